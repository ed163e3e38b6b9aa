//! Worker-side decode of one `PrimitiveBlock` into public entities: dense
//! node prefix sums, sentinel-framed tag streams, string-table resolution
//! and info assembly.

use std::collections::HashMap;

use prost::Message;
use time::OffsetDateTime;
use tracing::{span, trace, Level};

use crate::blob;
use crate::elements::{Entity, Info, Member, MemberKind, Node, Relation, Way};
use crate::error::{Error, Result};
use crate::osm_pbf;

/// Decodes one blob at a time. Each pipeline worker owns one of these;
/// `data` is the inflate scratch reused across blobs.
pub(crate) struct BlockDecoder {
    data: Vec<u8>,
}

impl BlockDecoder {
    pub(crate) fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub(crate) fn decode(&mut self, blob: &osm_pbf::Blob) -> Result<Vec<Entity>> {
        let _span = span!(Level::TRACE, "decode_block").entered();

        let data = blob::payload(blob, &mut self.data)?;
        let block = osm_pbf::PrimitiveBlock::decode(data)?;
        let ctx = BlockContext {
            strings: &block.stringtable.s,
            granularity: i64::from(block.granularity()),
            lat_offset: block.lat_offset(),
            lon_offset: block.lon_offset(),
            date_granularity: i64::from(block.date_granularity()),
        };

        let mut entities = Vec::new();
        for group in &block.primitivegroup {
            if let Some(dense) = &group.dense {
                decode_dense_nodes(&ctx, dense, &mut entities)?;
            }
            for node in &group.nodes {
                entities.push(Entity::Node(decode_node(&ctx, node)?));
            }
            for way in &group.ways {
                entities.push(Entity::Way(decode_way(&ctx, way)?));
            }
            for relation in &group.relations {
                entities.push(Entity::Relation(decode_relation(&ctx, relation)?));
            }
        }
        trace!(entities = entities.len(), "decoded primitive block");
        Ok(entities)
    }
}

/// Per-block decode settings plus the shared string table. Lives only for
/// the duration of one block's decode; emitted entities carry owned copies
/// of everything resolved through it.
struct BlockContext<'a> {
    strings: &'a [Vec<u8>],
    granularity: i64,
    lat_offset: i64,
    lon_offset: i64,
    date_granularity: i64,
}

impl BlockContext<'_> {
    fn lat(&self, raw: i64) -> f64 {
        1e-9 * (self.lat_offset + self.granularity * raw) as f64
    }

    fn lon(&self, raw: i64) -> f64 {
        1e-9 * (self.lon_offset + self.granularity * raw) as f64
    }

    fn string(&self, index: i64) -> Result<String> {
        let entry = usize::try_from(index)
            .ok()
            .and_then(|i| self.strings.get(i))
            .ok_or(Error::StringIndexOutOfRange {
                index,
                len: self.strings.len(),
            })?;
        Ok(String::from_utf8_lossy(entry).into_owned())
    }

    /// Materializes the parallel key/value index arrays used by standalone
    /// nodes, ways and relations.
    fn tags(&self, keys: &[u32], vals: &[u32]) -> Result<HashMap<String, String>> {
        if keys.len() != vals.len() {
            return Err(Error::TagArityMismatch {
                keys: keys.len(),
                vals: vals.len(),
            });
        }
        let mut tags = HashMap::with_capacity(keys.len());
        for (&key, &val) in keys.iter().zip(vals) {
            tags.insert(self.string(i64::from(key))?, self.string(i64::from(val))?);
        }
        Ok(tags)
    }

    fn info(&self, info: Option<&osm_pbf::Info>) -> Result<Info> {
        let Some(info) = info else {
            return Ok(Info::default());
        };
        let user = match info.user_sid {
            Some(sid) => self.string(i64::from(sid))?,
            None => String::new(),
        };
        Ok(Info {
            version: info.version() as i16,
            timestamp: info
                .timestamp
                .and_then(|t| timestamp_ms(t, self.date_granularity)),
            changeset: info.changeset() as u64,
            uid: info.uid(),
            user,
            visible: info.visible.unwrap_or(true),
        })
    }
}

fn timestamp_ms(raw: i64, date_granularity: i64) -> Option<OffsetDateTime> {
    let millis = raw.checked_mul(date_granularity)?;
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok()
}

fn decode_dense_nodes(
    ctx: &BlockContext,
    dense: &osm_pbf::DenseNodes,
    out: &mut Vec<Entity>,
) -> Result<()> {
    if dense.lat.len() != dense.id.len() || dense.lon.len() != dense.id.len() {
        return Err(Error::DenseArityMismatch {
            ids: dense.id.len(),
            lats: dense.lat.len(),
            lons: dense.lon.len(),
        });
    }

    let mut tags = DenseTagReader::new(&dense.keys_vals);
    let mut infos = dense.denseinfo.as_ref().map(DenseInfoReader::new);

    let mut id = 0i64;
    let mut lat = 0i64;
    let mut lon = 0i64;
    for i in 0..dense.id.len() {
        id += dense.id[i];
        lat += dense.lat[i];
        lon += dense.lon[i];
        let info = match &mut infos {
            Some(reader) => reader.next(ctx)?,
            None => Info::default(),
        };
        out.push(Entity::Node(Node {
            id,
            lat: ctx.lat(lat),
            lon: ctx.lon(lon),
            tags: tags.next(ctx)?,
            info,
        }));
    }
    Ok(())
}

/// Cursor over the flat dense tag stream: one zero-terminated run of
/// (key, value) string index pairs per node.
struct DenseTagReader<'a> {
    keys_vals: &'a [i32],
    cursor: usize,
}

impl<'a> DenseTagReader<'a> {
    fn new(keys_vals: &'a [i32]) -> Self {
        Self {
            keys_vals,
            cursor: 0,
        }
    }

    fn next(&mut self, ctx: &BlockContext) -> Result<HashMap<String, String>> {
        let mut tags = HashMap::new();
        // An absent stream means none of the nodes carry tags.
        if self.keys_vals.is_empty() {
            return Ok(tags);
        }
        loop {
            let key = *self
                .keys_vals
                .get(self.cursor)
                .ok_or(Error::DenseTagsUnderflow)?;
            self.cursor += 1;
            if key == 0 {
                return Ok(tags);
            }
            let val = *self
                .keys_vals
                .get(self.cursor)
                .ok_or(Error::DenseTagsUnderflow)?;
            self.cursor += 1;
            tags.insert(ctx.string(i64::from(key))?, ctx.string(i64::from(val))?);
        }
    }
}

/// Cursor over the delta-coded `DenseInfo` arrays, running the prefix sums
/// for timestamp, changeset, uid and user string index in parallel.
struct DenseInfoReader<'a> {
    info: &'a osm_pbf::DenseInfo,
    index: usize,
    timestamp: i64,
    changeset: i64,
    uid: i64,
    user_sid: i64,
}

impl<'a> DenseInfoReader<'a> {
    fn new(info: &'a osm_pbf::DenseInfo) -> Self {
        Self {
            info,
            index: 0,
            timestamp: 0,
            changeset: 0,
            uid: 0,
            user_sid: 0,
        }
    }

    fn next(&mut self, ctx: &BlockContext) -> Result<Info> {
        let i = self.index;
        self.index += 1;

        if let Some(delta) = self.info.timestamp.get(i) {
            self.timestamp += delta;
        }
        if let Some(delta) = self.info.changeset.get(i) {
            self.changeset += delta;
        }
        if let Some(delta) = self.info.uid.get(i) {
            self.uid += i64::from(*delta);
        }
        let user = match self.info.user_sid.get(i) {
            Some(delta) => {
                self.user_sid += i64::from(*delta);
                ctx.string(self.user_sid)?
            }
            None => String::new(),
        };

        Ok(Info {
            version: self.info.version.get(i).copied().unwrap_or(-1) as i16,
            timestamp: self
                .info
                .timestamp
                .get(i)
                .and_then(|_| timestamp_ms(self.timestamp, ctx.date_granularity)),
            changeset: self.changeset as u64,
            uid: self.uid as i32,
            user,
            visible: self.info.visible.get(i).copied().unwrap_or(true),
        })
    }
}

fn decode_node(ctx: &BlockContext, node: &osm_pbf::Node) -> Result<Node> {
    Ok(Node {
        id: node.id,
        lat: ctx.lat(node.lat),
        lon: ctx.lon(node.lon),
        tags: ctx.tags(&node.keys, &node.vals)?,
        info: ctx.info(node.info.as_ref())?,
    })
}

fn decode_way(ctx: &BlockContext, way: &osm_pbf::Way) -> Result<Way> {
    let mut node_ids = Vec::with_capacity(way.refs.len());
    let mut id = 0i64;
    for delta in &way.refs {
        id += delta;
        node_ids.push(id);
    }
    Ok(Way {
        id: way.id,
        tags: ctx.tags(&way.keys, &way.vals)?,
        node_ids,
        info: ctx.info(way.info.as_ref())?,
    })
}

fn decode_relation(ctx: &BlockContext, relation: &osm_pbf::Relation) -> Result<Relation> {
    if relation.roles_sid.len() != relation.memids.len()
        || relation.types.len() != relation.memids.len()
    {
        return Err(Error::MemberArityMismatch {
            roles: relation.roles_sid.len(),
            memids: relation.memids.len(),
            types: relation.types.len(),
        });
    }

    let mut members = Vec::with_capacity(relation.memids.len());
    let mut member_id = 0i64;
    for i in 0..relation.memids.len() {
        member_id += relation.memids[i];
        let kind = match relation.types[i] {
            0 => MemberKind::Node,
            1 => MemberKind::Way,
            2 => MemberKind::Relation,
            value => return Err(Error::UnknownMemberType { value }),
        };
        members.push(Member {
            id: member_id,
            kind,
            role: ctx.string(i64::from(relation.roles_sid[i]))?,
        });
    }
    Ok(Relation {
        id: relation.id,
        tags: ctx.tags(&relation.keys, &relation.vals)?,
        members,
        info: ctx.info(relation.info.as_ref())?,
    })
}
