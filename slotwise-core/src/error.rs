//! Error types for the Slotwise core library.
//!
//! Defines the error enum exposed by the public scheduling API and a
//! convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced when a deadline sequence cannot be scheduled.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ScheduleError {
    /// The deadline sequence was empty, so there are no slots to schedule into.
    #[error("at least one task is required to build a schedule")]
    EmptyDeadlines,
    /// A deadline referenced a slot outside `[0, slots)`.
    #[error("task {task} has deadline {deadline} but only {slots} slots exist")]
    DeadlineOutOfRange {
        /// Zero-based position of the offending task in the input sequence.
        task: usize,
        /// The out-of-range deadline.
        deadline: usize,
        /// Number of slots available in the pass.
        slots: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`ScheduleError`] variants.
    enum ScheduleErrorCode for ScheduleError {
        /// The deadline sequence was empty.
        EmptyDeadlines => EmptyDeadlines => "SCHEDULE_EMPTY_DEADLINES",
        /// A deadline referenced a slot outside the pass.
        DeadlineOutOfRange => DeadlineOutOfRange { .. } => "SCHEDULE_DEADLINE_OUT_OF_RANGE",
    }
}

/// Convenient result alias for scheduling operations.
pub type Result<T> = core::result::Result<T, ScheduleError>;
