//! Record shapes: types whose fields map one-to-one onto table columns.

use crate::types::RowValues;

/// A value that can be written as one table row.
///
/// `columns` lists `(column name, value)` pairs in declaration order. Names
/// are lower-cased by the statement builders; the primary key is
/// server-assigned and must not be listed.
pub trait Record {
    fn columns(&self) -> Vec<(&'static str, RowValues)>;
}

impl<R: Record + ?Sized> Record for &R {
    fn columns(&self) -> Vec<(&'static str, RowValues)> {
        (**self).columns()
    }
}

/// Implement [`Record`] for a struct from a list of its fields, in column order.
/// Each field must be `Clone` and convert into [`RowValues`].
///
/// ```rust
/// use mysql_middleware::{impl_record, prelude::*};
///
/// struct Item {
///     name: String,
///     qty: i64,
/// }
/// impl_record!(Item { name, qty });
///
/// let item = Item { name: "bolt".into(), qty: 7 };
/// let cols = item.columns();
/// assert_eq!(cols[0], ("name", RowValues::Text("bolt".into())));
/// assert_eq!(cols[1], ("qty", RowValues::Int(7)));
/// ```
#[macro_export]
macro_rules! impl_record {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl $crate::record::Record for $ty {
            fn columns(&self) -> Vec<(&'static str, $crate::types::RowValues)> {
                vec![
                    $((
                        stringify!($field),
                        $crate::types::RowValues::from(self.$field.clone()),
                    )),+
                ]
            }
        }
    };
}
