use tracing::info;

use crate::{
    domain::{Relation, UserList},
    errors::Error,
    ports::{GraphProvider, Session},
    Result,
};

/// Upper bound on pages per listing. A provider that keeps handing out
/// cursors past this is misbehaving; we fail instead of looping forever.
const MAX_PAGES: usize = 10_000;

/// Fetch every page of `relation` and concatenate the records in provider
/// order.
///
/// Any failure discards what was accumulated so far; the caller never sees a
/// partial list. Persistence is the caller's explicit step afterwards.
pub async fn collect(
    provider: &dyn GraphProvider,
    session: &Session,
    relation: Relation,
) -> Result<UserList> {
    let mut items = UserList::new();
    let mut cursor: Option<String> = None;

    for page_no in 1..=MAX_PAGES {
        let page = provider.fetch_page(session, relation, cursor.as_deref()).await?;
        info!(
            "{relation}: page {page_no} returned {} records (total {})",
            page.records.len(),
            items.len() + page.records.len()
        );
        items.extend(page.records);

        match page.next_cursor {
            None => {
                info!("{relation}: listing complete, {} records", items.len());
                return Ok(items);
            }
            Some(next) => {
                if cursor.as_deref() == Some(next.as_str()) {
                    return Err(Error::Provider(format!(
                        "{relation}: provider repeated cursor {next:?}"
                    )));
                }
                cursor = Some(next);
            }
        }
    }

    Err(Error::Provider(format!(
        "{relation}: pagination did not terminate within {MAX_PAGES} pages"
    )))
}
