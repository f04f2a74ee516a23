//! Inquiry deep links.
//!
//! A prospective buyer contacts the seller about a specific image through a
//! pre-filled WhatsApp link. The message text is encoded
//! `application/x-www-form-urlencoded` style (spaces become `+`), matching
//! what `wa.me` expects in its `text` parameter.

use url::form_urlencoded;

const INQUIRY_PREFIX: &str = "Hello! I am interested in the image: ";

/// Build the `wa.me` link for one image.
///
/// `phone` is the configured contact number, digits only; an empty phone
/// still produces a syntactically valid link (wa.me then prompts for a
/// number), so the gallery renders the same either way.
pub fn inquiry_link(phone: &str, filename: &str) -> String {
    let text: String =
        form_urlencoded::byte_serialize(format!("{INQUIRY_PREFIX}{filename}").as_bytes())
            .collect();
    format!("https://wa.me/{phone}?text={text}")
}
