//! Streaming decoder for OpenStreetMap PBF extracts.
//!
//! A PBF file is a sequence of length-prefixed, individually compressed
//! blocks. [`Decoder`] pulls them off any [`std::io::Read`] source, fans
//! the blocks out to a ring of worker threads and re-serializes the decoded
//! entities in file order behind the pull-based [`Decoder::next`], so a
//! multi-gigabyte planet extract decodes with bounded memory on all cores.
//!
//! ```no_run
//! use osm_pbf_stream::{Decoder, Entity};
//!
//! # fn main() -> osm_pbf_stream::Result<()> {
//! let file = std::fs::File::open("extract.osm.pbf")?;
//! let mut decoder = Decoder::new(std::io::BufReader::new(file));
//! decoder.start(4)?;
//! while let Some(entity) = decoder.next()? {
//!     if let Entity::Node(node) = entity {
//!         println!("{} at ({}, {})", node.id, node.lat, node.lon);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub use decoder::{Decoder, Entities};
pub use elements::{Entity, Info, Member, MemberKind, Node, Relation, Way};
pub use error::{Error, Result};
pub use progress::ProgressReader;

mod blob;
mod block;
mod decoder;
mod elements;
mod error;
mod header;
pub mod osm_pbf;
mod progress;
