//! Regional API endpoint resolution.
//!
//! MailChimp embeds the regional data center in the API key itself, as a
//! suffix after the last `-` (e.g. `abc123-us6` lives in `us6`). The list
//! statistics endpoint is built from that suffix and the list ID.

use url::Url;

use crate::config::Credentials;
use crate::error::CountError;

/// Build the list statistics endpoint for the given credentials.
///
/// Returns [`CountError::InvalidCredentials`] when either field is empty,
/// the key carries no `-`, or the data-center segment is blank. Callers
/// treat this as "no count available", not a fatal error.
pub fn endpoint_url(credentials: &Credentials) -> Result<Url, CountError> {
    if !credentials.is_configured() {
        return Err(CountError::InvalidCredentials);
    }

    let (_, data_center) = credentials
        .api_key
        .rsplit_once('-')
        .ok_or(CountError::InvalidCredentials)?;

    if data_center.is_empty() {
        return Err(CountError::InvalidCredentials);
    }

    let endpoint = format!(
        "https://{data_center}.api.mailchimp.com/3.0/lists/{list_id}",
        list_id = credentials.list_id
    );

    // A key with characters illegal in a host name would produce an
    // unparseable URL; fold that into the same credential error.
    Url::parse(&endpoint).map_err(|_| CountError::InvalidCredentials)
}
