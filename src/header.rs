//! Validation of the leading `OSMHeader` block.

use prost::Message;
use tracing::trace;

use crate::blob;
use crate::error::{Error, Result};
use crate::osm_pbf;

/// Features this decoder honors when a file marks them required. Anything
/// else aborts the decode before any data block is dispatched.
const CAPABILITIES: &[&str] = &["OsmSchema-V0.6", "DenseNodes"];

/// Checks that the first file block is an `OSMHeader` whose required
/// features are all within [`CAPABILITIES`].
pub(crate) fn validate(
    header: &osm_pbf::BlobHeader,
    blob: &osm_pbf::Blob,
    scratch: &mut Vec<u8>,
) -> Result<osm_pbf::HeaderBlock> {
    if header.r#type != "OSMHeader" {
        return Err(Error::UnexpectedBlockType {
            found: header.r#type.clone(),
        });
    }
    let data = blob::payload(blob, scratch)?;
    let block = osm_pbf::HeaderBlock::decode(data)?;
    for feature in &block.required_features {
        if !CAPABILITIES.contains(&feature.as_str()) {
            return Err(Error::UnsupportedFeature {
                feature: feature.clone(),
            });
        }
    }
    trace!(
        writingprogram = block.writingprogram(),
        source = block.source(),
        "validated OSMHeader"
    );
    Ok(block)
}
