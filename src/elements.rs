use std::collections::HashMap;

use time::OffsetDateTime;

/// Authorship metadata attached to every entity.
///
/// `version` is -1 when the source file carries no metadata for the entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Info {
    pub version: i16,
    pub timestamp: Option<OffsetDateTime>,
    pub changeset: u64,
    pub uid: i32,
    pub user: String,
    pub visible: bool,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            version: -1,
            timestamp: None,
            changeset: 0,
            uid: 0,
            user: String::new(),
            visible: true,
        }
    }
}

/// A point with coordinates in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    pub tags: HashMap<String, String>,
    pub info: Info,
}

/// An ordered polyline referencing nodes by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Way {
    pub id: i64,
    pub tags: HashMap<String, String>,
    pub node_ids: Vec<i64>,
    pub info: Info,
}

/// A typed collection of other entities.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    pub id: i64,
    pub tags: HashMap<String, String>,
    pub members: Vec<Member>,
    pub info: Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Node,
    Way,
    Relation,
}

/// One membership entry of a [`Relation`].
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: i64,
    pub kind: MemberKind,
    pub role: String,
}

/// The tagged sum flowing out of the decode pipeline. Consumers discriminate
/// on the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Node(Node),
    Way(Way),
    Relation(Relation),
}

impl Entity {
    pub fn id(&self) -> i64 {
        match self {
            Entity::Node(n) => n.id,
            Entity::Way(w) => w.id,
            Entity::Relation(r) => r.id,
        }
    }
}
