//! Paginated traversal of a hosted zone.

use dangle_core::{
    DangleError, ListRecordSetsRequest, RecordSetPage, RecordSetSource, ResourceRecordSet, Result,
};
use futures_util::stream::{self, Stream, StreamExt, TryStreamExt};
use tracing::debug;

/// Walks every record set of one zone, one page at a time
pub struct ZoneWalker<'a, S: ?Sized> {
    source: &'a S,
    zone_id: String,
    page_size: Option<u32>,
}

/// What the next step of a walk does
enum Cursor {
    Fetch(ListRecordSetsRequest),
    Broken(String),
    Done,
}

impl<'a, S: RecordSetSource + ?Sized> ZoneWalker<'a, S> {
    /// Walker over `zone_id` using `source` for page requests
    pub fn new(source: &'a S, zone_id: impl Into<String>) -> Self {
        Self {
            source,
            zone_id: zone_id.into(),
            page_size: None,
        }
    }

    /// Ask for at most `max_items` record sets per page
    #[must_use]
    pub const fn page_size(mut self, max_items: Option<u32>) -> Self {
        self.page_size = max_items;
        self
    }

    /// Zone being walked
    #[must_use]
    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }

    /// Pages of the zone, in order.
    ///
    /// Every call starts a fresh traversal from the zone apex. The stream
    /// ends after the first error.
    pub fn pages(&self) -> impl Stream<Item = Result<RecordSetPage>> + '_ {
        let first = ListRecordSetsRequest {
            zone_id: self.zone_id.clone(),
            start: None,
            max_items: self.page_size,
        };

        stream::try_unfold(Cursor::Fetch(first), move |cursor| async move {
            let request = match cursor {
                Cursor::Fetch(request) => request,
                Cursor::Broken(zone_id) => return Err(DangleError::MissingCursor { zone_id }),
                Cursor::Done => return Ok(None),
            };

            debug!(zone_id = %request.zone_id, start = ?request.start, "requesting page");
            let page = self.source.list_record_sets(&request).await?;

            let next = if !page.is_truncated {
                Cursor::Done
            } else if let Some(start) = page.next_position() {
                Cursor::Fetch(ListRecordSetsRequest {
                    start: Some(start),
                    ..request
                })
            } else {
                Cursor::Broken(request.zone_id)
            };

            Ok(Some((page, next)))
        })
    }

    /// Raw record sets of the zone, in order
    pub fn records(&self) -> impl Stream<Item = Result<ResourceRecordSet>> + '_ {
        self.pages()
            .map_ok(|page| stream::iter(page.resource_record_sets).map(Ok::<_, DangleError>))
            .try_flatten()
    }
}
