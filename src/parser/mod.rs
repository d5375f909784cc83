//! Parser layer
//! - traits.rs: Parser trait definition and ParseError
//! - ini.rs: INI parser for release override files and setup.cfg
//! - pkg_info.rs: PKG-INFO / METADATA header parser

pub mod ini;
pub mod pkg_info;
pub mod traits;

pub use ini::{IniDocument, IniParser};
pub use pkg_info::{PkgInfo, PkgInfoParser};
pub use traits::{ParseError, Parser};
