//! User facing build problems, shaped after the @parcel/diagnostic format
mod code_frame;
mod code_highlight;
mod diagnostic;
mod diagnostics;

pub use self::code_frame::*;
pub use self::code_highlight::*;
pub use self::diagnostic::*;
pub use self::diagnostics::*;
