//! # Data model
//!
//! The types shared by the layout compiler and the encode/decode engine:
//!
//! - [`TypeTag`] and [`ScalarType`]: the wire types a field may have.
//! - [`FieldDecl`] and [`Schema`]: the declarative, ordered field list that describes
//!   a packed binary layout.
//! - [`Value`] and [`Record`]: the dynamic data object that is encoded into, and
//!   decoded out of, a byte buffer.
//! - [`SchemaError`]: everything that can be wrong with a declaration.
//!
//! A schema describes a packed C struct, field after field, with no padding:
//!
//! ```text
//! struct Reading {            // [
//!     uint32_t id;            //   ["id", "uint32"],
//!     char     name[8];       //   ["name", "string", 8],
//!     int16_t  scores[4];     //   ["scores", "int16", null, 4],
//! };                          // ]
//! ```

mod decl;
mod error;
mod type_tag;
mod value;

pub use decl::*;
pub use error::*;
pub use type_tag::*;
pub use value::*;
