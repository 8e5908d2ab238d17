//! Value parsers for session environment toggles.

use actix_web::cookie::SameSite;

pub(super) const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
pub(super) const SAME_SITE_EXPECTED: &str = "Strict|Lax|None";

pub(super) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

pub(super) fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.trim().to_ascii_lowercase().as_str() {
        "lax" => Some(SameSite::Lax),
        "strict" => Some(SameSite::Strict),
        "none" => Some(SameSite::None),
        _ => None,
    }
}
