//! GET with error reporting.

use serde_json::Value;
use tracing::{error, warn};

use terracotta_api::JsonFetcher;
use terracotta_common::{ClientError, ClientResult};

use crate::errors::{ErrorQueue, ErrorRecord};
use crate::ui::ViewerUi;

/// GET `url` through `fetcher`. A failure is queued, the error list is
/// re-rendered, and the error is returned so dependent steps do not run.
pub(crate) async fn http_get<F, U>(
    fetcher: &F,
    errors: &mut ErrorQueue,
    ui: &mut U,
    url: &str,
) -> ClientResult<Value>
where
    F: JsonFetcher + ?Sized,
    U: ViewerUi + ?Sized,
{
    match fetcher.get_json(url).await {
        Ok(value) => Ok(value),
        Err(err) => {
            record_failure(errors, ui, url, &err);
            Err(err)
        }
    }
}

/// Queue one error record for a failed request and re-render.
pub(crate) fn record_failure<U: ViewerUi + ?Sized>(
    errors: &mut ErrorQueue,
    ui: &mut U,
    url: &str,
    err: &ClientError,
) {
    let text = format!("API request failed: {}", err.status_text());
    error!(url = %url, error = %err, "{}", text);
    errors.push(ErrorRecord::new(text, url));
    ui.render_errors(errors);
}

/// Log a response that arrived but could not be decoded.
pub(crate) fn log_decode<T>(result: ClientResult<T>) -> ClientResult<T> {
    if let Err(err) = &result {
        warn!(url = err.url().unwrap_or_default(), error = %err, "Undecodable response");
    }
    result
}
