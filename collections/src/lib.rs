pub mod collection;
pub mod error;
pub mod iter;
pub mod naming;
pub mod policy;
pub mod typed;

pub use self::collection::{Collection, List, PrependList, SortedList};
pub use self::error::{CollectionError, ErrorKind};
pub use self::iter::{IntoIter, Iter};
pub use self::policy::{Append, InsertionPolicy, Prepend, Sorted, SortedBy};
pub use self::typed::{TypeName, Typed, ValueKind};
