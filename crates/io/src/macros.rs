//! Declarative macros for schema boilerplate.

/// Implements `Serializable` for a struct from its ordered field list.
///
/// Fields are written and read in the order listed, which must match the
/// declared wire order of the struct.
///
/// # Example
///
/// ```rust
/// use ptb_io::{impl_serializable_struct, SerializableExt};
///
/// #[derive(Debug, PartialEq)]
/// struct Coin {
///     value: u64,
///     locked: bool,
/// }
///
/// impl_serializable_struct!(Coin { value, locked });
///
/// let bytes = Coin { value: 5, locked: true }.to_bytes().unwrap();
/// assert_eq!(bytes, vec![5, 0, 0, 0, 0, 0, 0, 0, 1]);
/// ```
#[macro_export]
macro_rules! impl_serializable_struct {
    ($type:ident { $($field:ident),+ $(,)? }) => {
        impl $crate::Serializable for $type {
            fn serialize(&self, writer: &mut $crate::BinaryWriter) -> $crate::IoResult<()> {
                $( $crate::Serializable::serialize(&self.$field, writer)?; )+
                Ok(())
            }

            fn deserialize(reader: &mut $crate::MemoryReader) -> $crate::IoResult<Self> {
                Ok(Self {
                    $( $field: $crate::Serializable::deserialize(reader)?, )+
                })
            }
        }
    };
}
