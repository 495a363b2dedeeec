#[macro_export]
/// Helper macro to compose `From` implementations.
macro_rules! compose_from {
    ($to:tt, $mid:tt, $from:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> Self { Self::from($mid::from(f)) }
        }
    };
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_fn {
    ($to:ty, $from:ty, $fn:expr) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $fn(f) }
        }
    };
}

#[macro_export]
/// Helper macro to implement `TryFrom` for a single-field variant.
macro_rules! try_from_ctor {
    ($from:tt, $to:ty, $ctor:path) => {
        impl std::convert::TryFrom<$from> for $to {
            type Error = $from;

            fn try_from(v: $from) -> std::result::Result<$to, $from> {
                match v {
                    $ctor(x) => Ok(x),
                    other => Err(other),
                }
            }
        }
    };
}
