//! Shared fixture builders: synthetic PBF files assembled frame by frame.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use prost::Message;

use osm_pbf_stream::{osm_pbf, Decoder, Entity, Error};

/// One framed file block: 4-byte big-endian length, `BlobHeader`, `Blob`.
pub fn frame(block_type: &str, blob: &osm_pbf::Blob) -> Vec<u8> {
    let blob_bytes = blob.encode_to_vec();
    let header = osm_pbf::BlobHeader {
        r#type: block_type.to_string(),
        indexdata: None,
        datasize: blob_bytes.len() as i32,
    };
    let header_bytes = header.encode_to_vec();
    let mut out = Vec::new();
    out.extend_from_slice(&(header_bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(&header_bytes);
    out.extend_from_slice(&blob_bytes);
    out
}

pub fn header_frame(required_features: &[&str]) -> Vec<u8> {
    let block = osm_pbf::HeaderBlock {
        required_features: required_features.iter().map(|f| f.to_string()).collect(),
        writingprogram: Some("osm-pbf-stream tests".to_string()),
        ..Default::default()
    };
    let blob = osm_pbf::Blob {
        raw: Some(block.encode_to_vec()),
        ..Default::default()
    };
    frame("OSMHeader", &blob)
}

pub fn raw_blob(block: &osm_pbf::PrimitiveBlock) -> osm_pbf::Blob {
    osm_pbf::Blob {
        raw: Some(block.encode_to_vec()),
        ..Default::default()
    }
}

pub fn zlib_blob(block: &osm_pbf::PrimitiveBlock) -> osm_pbf::Blob {
    let raw = block.encode_to_vec();
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&raw).unwrap();
    osm_pbf::Blob {
        zlib_data: Some(encoder.finish().unwrap()),
        raw_size: Some(raw.len() as i32),
        ..Default::default()
    }
}

/// A complete file: the standard header followed by one `OSMData` frame per
/// blob.
pub fn file(blobs: &[osm_pbf::Blob]) -> Vec<u8> {
    let mut out = header_frame(&["OsmSchema-V0.6", "DenseNodes"]);
    for blob in blobs {
        out.extend_from_slice(&frame("OSMData", blob));
    }
    out
}

/// A block with three dense nodes, a way and a relation, ids derived from
/// `base` so blocks are distinguishable in ordering assertions:
/// `[base, base+1, base+2, base+10, base+20]`.
pub fn mixed_block(base: i64) -> osm_pbf::PrimitiveBlock {
    osm_pbf::PrimitiveBlock {
        stringtable: osm_pbf::StringTable {
            s: vec![b"".to_vec(), b"name".to_vec(), b"square".to_vec()],
        },
        primitivegroup: vec![osm_pbf::PrimitiveGroup {
            dense: Some(osm_pbf::DenseNodes {
                id: vec![base, 1, 1],
                lat: vec![1_000, 10, 10],
                lon: vec![2_000, 10, 10],
                keys_vals: vec![1, 2, 0, 0, 0],
                ..Default::default()
            }),
            ways: vec![osm_pbf::Way {
                id: base + 10,
                keys: vec![1],
                vals: vec![2],
                refs: vec![base, 1, 1],
                ..Default::default()
            }],
            relations: vec![osm_pbf::Relation {
                id: base + 20,
                roles_sid: vec![1],
                memids: vec![base],
                types: vec![1],
                ..Default::default()
            }],
            ..Default::default()
        }],
        ..Default::default()
    }
}

pub fn kind_name(entity: &Entity) -> &'static str {
    match entity {
        Entity::Node(_) => "node",
        Entity::Way(_) => "way",
        Entity::Relation(_) => "relation",
    }
}

/// Pulls the stream dry, returning the `(id, kind)` trace and the error that
/// ended it, if any.
pub fn drain<R: std::io::Read + Send + 'static>(
    decoder: &Decoder<R>,
) -> (Vec<(i64, &'static str)>, Option<Error>) {
    let mut seen = Vec::new();
    loop {
        match decoder.next() {
            Ok(Some(entity)) => seen.push((entity.id(), kind_name(&entity))),
            Ok(None) => return (seen, None),
            Err(error) => return (seen, Some(error)),
        }
    }
}
