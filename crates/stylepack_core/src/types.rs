pub use self::bundle_config::*;
pub use self::bundle_result::*;
pub use self::output_file::*;
pub use self::stylesheet_language::*;

mod bundle_config;
mod bundle_result;
mod output_file;
mod stylesheet_language;
