//! The parallel block pipeline: one producer pulling frames off the byte
//! source, a ring of worker threads decoding blocks, and a collector that
//! drains the ring in dispatch order so entities come out in file order.

use std::io::Read;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::{debug, trace};

use crate::blob::{self, BlobReader};
use crate::block::BlockDecoder;
use crate::elements::Entity;
use crate::error::{Error, Result};
use crate::header;
use crate::osm_pbf;

/// Serializer queue capacity; a typical `PrimitiveBlock` holds ~8k entities,
/// so one block's worth of slack keeps the consumer from stalling workers.
const SERIALIZER_CAPACITY: usize = 8_000;

/// What the producer hands a worker: one blob to decode, or the reason the
/// stream stopped (`None` for a clean end of input).
enum Feed {
    Block(osm_pbf::Blob),
    Stop(Option<Error>),
}

/// A worker's answer: the block's entities in decoded order, or the
/// terminal stop relayed through the ring.
enum Drained {
    Entities(Vec<Entity>),
    Stop(Option<Error>),
}

/// Streaming decoder for OSM PBF data read from `source`.
///
/// [`start`](Self::start) validates the leading `OSMHeader` block and then
/// spawns the pipeline; [`next`](Self::next) pulls decoded entities in file
/// order. The pipeline shuts itself down when the decoder is dropped: every
/// stage exits on its next send once the adjacent channel disconnects.
pub struct Decoder<R> {
    // The mutex keeps the decoder Sync for sources that are only Send; it
    // is locked exactly once, when start moves the source into the reader.
    source: Mutex<Option<R>>,
    buf_size: usize,
    items: OnceLock<Receiver<Result<Entity>>>,
}

impl<R: Read + Send + 'static> Decoder<R> {
    pub fn new(source: R) -> Self {
        Self {
            source: Mutex::new(Some(source)),
            buf_size: blob::DEFAULT_BUF_SIZE,
            items: OnceLock::new(),
        }
    }

    /// Initial capacity of the frame reader's scratch buffer. The default of
    /// 1 MiB suits typical extracts; any value stays correct because the
    /// buffer grows on demand. Only meaningful before [`start`](Self::start).
    pub fn set_buffer_size(&mut self, n: usize) {
        self.buf_size = n;
    }

    /// Reads and validates the `OSMHeader` block synchronously, then
    /// launches the pipeline with `workers` decoder threads (clamped to at
    /// least one).
    pub fn start(&mut self, workers: usize) -> Result<()> {
        let source = self
            .source
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or(Error::AlreadyStarted)?;
        let workers = workers.max(1);

        let mut reader = BlobReader::new(source, self.buf_size);
        let (header, blob) = reader.read_file_block()?.ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "stream ended before the OSMHeader block",
            ))
        })?;
        header::validate(&header, &blob, &mut Vec::new())?;

        let (items_tx, items_rx) = bounded(SERIALIZER_CAPACITY);
        let mut feeds = Vec::with_capacity(workers);
        let mut drains = Vec::with_capacity(workers);
        for i in 0..workers {
            let (feed_tx, feed_rx) = bounded::<Feed>(0);
            let (drain_tx, drain_rx) = bounded::<Drained>(0);
            thread::Builder::new()
                .name(format!("pbf-worker-{i}"))
                .spawn(move || worker_loop(feed_rx, drain_tx))?;
            feeds.push(feed_tx);
            drains.push(drain_rx);
        }
        thread::Builder::new()
            .name("pbf-reader".to_string())
            .spawn(move || producer_loop(reader, feeds))?;
        thread::Builder::new()
            .name("pbf-collector".to_string())
            .spawn(move || collector_loop(drains, items_tx))?;

        debug!(workers, "decode pipeline started");
        let _ = self.items.set(items_rx);
        Ok(())
    }

    /// Pulls the next entity in file order. `Ok(None)` is end of stream.
    ///
    /// The first error raised anywhere in the pipeline is returned exactly
    /// once; every call after that reports end of stream. Entities decoded
    /// before the failure point are still delivered first. Safe to call from
    /// several consumer threads at once; each item goes to exactly one
    /// caller.
    pub fn next(&self) -> Result<Option<Entity>> {
        let items = self.items.get().ok_or(Error::NotStarted)?;
        match items.recv() {
            Ok(Ok(entity)) => Ok(Some(entity)),
            Ok(Err(error)) => Err(error),
            Err(_) => Ok(None),
        }
    }

    /// Borrowing iterator over [`next`](Self::next). Ends at end of stream;
    /// a pipeline error is yielded as its final `Err` item.
    pub fn iter(&self) -> Entities<'_, R> {
        Entities { decoder: self }
    }
}

/// Iterator adapter returned by [`Decoder::iter`].
pub struct Entities<'a, R> {
    decoder: &'a Decoder<R>,
}

impl<R: Read + Send + 'static> Iterator for Entities<'_, R> {
    type Item = Result<Entity>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.decoder.next() {
            Ok(Some(entity)) => Some(Ok(entity)),
            Ok(None) => None,
            Err(error) => Some(Err(error)),
        }
    }
}

/// Reads data frames and deals them to the workers round-robin. The stop
/// marker (clean or not) goes to the worker that would have received the
/// next blob, so the collector meets it at the matching ring position.
fn producer_loop<R: Read>(mut reader: BlobReader<R>, feeds: Vec<Sender<Feed>>) {
    let mut cursor = 0;
    loop {
        let feed = &feeds[cursor];
        cursor = (cursor + 1) % feeds.len();
        match reader.read_file_block() {
            Ok(Some((header, blob))) => {
                if header.r#type != "OSMData" {
                    let _ = feed.send(Feed::Stop(Some(Error::UnexpectedBlockType {
                        found: header.r#type,
                    })));
                    return;
                }
                if feed.send(Feed::Block(blob)).is_err() {
                    // Consumer dropped the decoder; unwind quietly.
                    return;
                }
            }
            Ok(None) => {
                trace!("reached end of stream");
                let _ = feed.send(Feed::Stop(None));
                return;
            }
            Err(error) => {
                let _ = feed.send(Feed::Stop(Some(error)));
                return;
            }
        }
    }
}

fn worker_loop(feed: Receiver<Feed>, drain: Sender<Drained>) {
    let mut decoder = BlockDecoder::new();
    for item in feed {
        let drained = match item {
            Feed::Block(blob) => match decoder.decode(&blob) {
                Ok(entities) => Drained::Entities(entities),
                Err(error) => Drained::Stop(Some(error)),
            },
            Feed::Stop(reason) => Drained::Stop(reason),
        };
        if drain.send(drained).is_err() {
            return;
        }
    }
}

/// Drains the worker ring with the same round-robin cursor the producer
/// used for dispatch, which restores file order without sequence numbers.
/// Stops at the first terminal item and closes the serializer queue behind
/// it.
fn collector_loop(drains: Vec<Receiver<Drained>>, items: Sender<Result<Entity>>) {
    let mut cursor = 0;
    loop {
        let drain = &drains[cursor];
        cursor = (cursor + 1) % drains.len();
        match drain.recv() {
            Ok(Drained::Entities(entities)) => {
                for entity in entities {
                    if items.send(Ok(entity)).is_err() {
                        return;
                    }
                }
            }
            Ok(Drained::Stop(Some(error))) => {
                debug!(%error, "pipeline stopping on error");
                let _ = items.send(Err(error));
                return;
            }
            Ok(Drained::Stop(None)) | Err(_) => return,
        }
    }
}
