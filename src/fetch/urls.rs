// src/fetch/urls.rs
// =============================================================================
// Query URLs for the two endpoints. Same key, same URL, every time:
//
//   <catalog>?term_in=202409&subj_in=CSC&crse_in=110&schd_in=
//   <detail>?term_in=202409&crn_in=10953
// =============================================================================

use crate::catalog::{CapacityKey, CourseKey};
use url::Url;

pub fn listing_url(base: &Url, key: &CourseKey) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("term_in", &key.term)
        .append_pair("subj_in", &key.subject)
        .append_pair("crse_in", &key.course_number)
        .append_pair("schd_in", "");
    url
}

pub fn detail_url(base: &Url, key: &CapacityKey) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("term_in", &key.term)
        .append_pair("crn_in", &key.crn);
    url
}
