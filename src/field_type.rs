use core::cmp::Ordering;
use core::mem::size_of;

/// Primitive field kinds a schema can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// 32-bit unsigned integer (`u32`)
    UInt32,
    /// 32-bit signed integer (`i32`)
    Int32,
    /// 32-bit float (`f32`)
    Float32,
    /// Signed byte (`i8`)
    Char,
    /// Unsigned byte (`u8`)
    UChar,
    /// Opaque machine word (`usize`). Stored as a raw value, never dereferenced.
    Pointer,
}

impl FieldType {
    /// Every field type, in declaration order.
    pub const ALL: [FieldType; 6] = [
        FieldType::UInt32,
        FieldType::Int32,
        FieldType::Float32,
        FieldType::Char,
        FieldType::UChar,
        FieldType::Pointer,
    ];

    /// Size of one value of this type in bytes.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            FieldType::UInt32 => size_of::<u32>(),
            FieldType::Int32 => size_of::<i32>(),
            FieldType::Float32 => size_of::<f32>(),
            FieldType::Char => size_of::<i8>(),
            FieldType::UChar => size_of::<u8>(),
            FieldType::Pointer => size_of::<usize>(),
        }
    }

    /// Compares two encoded values of this type.
    ///
    /// Both slices must be exactly `self.width()` bytes long. Returns `None`
    /// for unordered floats.
    pub(crate) fn compare(self, a: &[u8], b: &[u8]) -> Option<Ordering> {
        match self {
            FieldType::UInt32 => Some(u32::decode(a).cmp(&u32::decode(b))),
            FieldType::Int32 => Some(i32::decode(a).cmp(&i32::decode(b))),
            FieldType::Float32 => f32::decode(a).partial_cmp(&f32::decode(b)),
            FieldType::Char => Some(i8::decode(a).cmp(&i8::decode(b))),
            FieldType::UChar => Some(u8::decode(a).cmp(&u8::decode(b))),
            FieldType::Pointer => Some(usize::decode(a).cmp(&usize::decode(b))),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A Rust primitive that can be stored in a field.
///
/// Implemented for `u32`, `i32`, `f32`, `i8`, `u8` and `usize`, one per
/// [`FieldType`]. Values are stored in native byte order.
pub trait FieldValue: Copy + sealed::Sealed {
    /// The field type this value is stored as.
    const TYPE: FieldType;

    #[doc(hidden)]
    fn decode(bytes: &[u8]) -> Self;

    #[doc(hidden)]
    fn encode(self, bytes: &mut [u8]);
}

macro_rules! impl_field_value {
    ($ty:ty, $field_type:expr) => {
        impl sealed::Sealed for $ty {}

        impl FieldValue for $ty {
            const TYPE: FieldType = $field_type;

            #[inline]
            fn decode(bytes: &[u8]) -> Self {
                let mut raw = [0u8; size_of::<$ty>()];
                raw.copy_from_slice(bytes);
                <$ty>::from_ne_bytes(raw)
            }

            #[inline]
            fn encode(self, bytes: &mut [u8]) {
                bytes.copy_from_slice(&self.to_ne_bytes());
            }
        }
    };
}

impl_field_value!(u32, FieldType::UInt32);
impl_field_value!(i32, FieldType::Int32);
impl_field_value!(f32, FieldType::Float32);
impl_field_value!(i8, FieldType::Char);
impl_field_value!(u8, FieldType::UChar);
impl_field_value!(usize, FieldType::Pointer);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(FieldType::UInt32.width(), 4);
        assert_eq!(FieldType::Int32.width(), 4);
        assert_eq!(FieldType::Float32.width(), 4);
        assert_eq!(FieldType::Char.width(), 1);
        assert_eq!(FieldType::UChar.width(), 1);
        assert_eq!(FieldType::Pointer.width(), size_of::<usize>());
    }

    #[test]
    fn test_value_types_match_widths() {
        assert_eq!(size_of::<u32>(), <u32 as FieldValue>::TYPE.width());
        assert_eq!(size_of::<i8>(), <i8 as FieldValue>::TYPE.width());
        assert_eq!(size_of::<usize>(), <usize as FieldValue>::TYPE.width());
    }

    #[test]
    fn test_compare_signed_and_float() {
        let mut a = [0u8; 4];
        let mut b = [0u8; 4];
        (-5i32).encode(&mut a);
        3i32.encode(&mut b);
        assert_eq!(FieldType::Int32.compare(&a, &b), Some(Ordering::Less));

        f32::NAN.encode(&mut a);
        1.0f32.encode(&mut b);
        assert_eq!(FieldType::Float32.compare(&a, &b), None);
    }
}
