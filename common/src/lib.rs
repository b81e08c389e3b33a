pub mod access;
pub mod responses;
pub mod token;

macro_rules! impl_from_error {
    ($from: ty, $to: expr, $target: ty) => {
        impl From<$from> for $target {
            fn from(err: $from) -> Self {
                $to(err)
            }
        }
    };
}

pub(crate) use impl_from_error;
