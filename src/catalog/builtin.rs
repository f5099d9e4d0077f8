// SPDX-License-Identifier: MPL-2.0
//! The built-in memory album, hosted on Cloudinary.

use super::{Album, MediaCatalog};
use crate::domain::media::MediaItem;
use crate::domain::music::Track;
use crate::error::CatalogError;

pub const ALBUM_TITLE: &str = "MARK'S ARCHIVE";
pub const ALBUM_SUBTITLE: &str = "MARK 10 YEARS 2025";

/// Cloudinary account hosting the album.
pub const CLOUD_NAME: &str = "dv9sf6jai";

const MEMORY_DATE: &str = "OCT 2023";
const PHOTO_DESCRIPTION: &str = "A beautiful moment captured in time.";
const VIDEO_DESCRIPTION: &str = "Action and laughter preserved forever.";

const TRACKS: [(&str, &str); 2] = [
    (
        "Abla (Memories)",
        "https://cdn.pixabay.com/download/audio/2022/05/27/audio_1808fbf07a.mp3?filename=winds-of-spring-10671.mp3",
    ),
    (
        "Soft Reflection",
        "https://cdn.pixabay.com/download/audio/2022/01/18/audio_d0a13f69d2.mp3?filename=soft-piano-100-bpm-121529.mp3",
    ),
];

const PHOTO_IDS: &[&str] = &[
    "IMG_3022_sbnd1a", "IMG_3025_gr0pfh", "IMG_3028_upispm", "IMG_3031_kinuxm", "IMG_3032_vhn9le",
    "IMG_3037_vhn9le", "IMG_3040_cll20w", "IMG_3047_gngvm6", "IMG_3050_zbcypw", "IMG_3053_ec0yam",
    "IMG_3056_qt95yk", "IMG_3057_g0pmi8", "IMG_3062_hpoaha", "IMG_3067_yiyfsz", "IMG_3069_r1l8f5",
    "IMG_3071_ypjt3x", "IMG_3072_lmcmyo", "IMG_3073_t3959b", "IMG_3083_skildn", "IMG_3085_abgvui",
    "IMG_3086_k0z1ma", "IMG_3088_bvmksf", "IMG_3089_nr4lje", "IMG_3092_sgpxlb", "IMG_3093_jpljmo",
    "IMG_3098_tdbvmw", "IMG_3101_ob5gcu", "IMG_3102_ei4qbr", "IMG_3118_a0o7fo", "IMG_3129_chuj0b",
    "IMG_3136_qfwko4", "IMG_3146_p5cpyf", "IMG_3166_pgqhpc", "IMG_3167_dkvlym", "IMG_3180_mveozs",
    "IMG_3182_i5glkk", "IMG_3185_ffr0xz", "IMG_3197_xcvu1z", "IMG_3206_fpkiiy", "IMG_3212_my0yay",
    "IMG_3218_ylk9nd", "IMG_3250_o0efa1", "IMG_3251_hcmvuj", "IMG_3256_ivt7sw", "IMG_3264_1_gtnaib",
    "IMG_3279_p0jcsf", "IMG_3282_fnmjmz", "IMG_3307_lmubcf", "IMG_3322_r0fzqu", "IMG_3324_pua7e4",
    "IMG_3335_dyxsfp", "IMG_3353_oduoc6", "IMG_3357_p1fbq9", "IMG_3363_pkvdha", "IMG_3366_iiazml",
    "IMG_3371_yemfpx", "IMG_3372_ue71jk", "IMG_3376_p4djt9", "IMG_3378_uftgyi", "IMG_3386_s9i6uz",
    "IMG_3387_nceo0i", "IMG_3390_ylgjex", "IMG_3393_x10ibp", "IMG_3398_okosjo", "IMG_3409_h53rb6",
    "IMG_3414_efjbrl",
];

const VIDEO_IDS: &[&str] = &[
    "MVI_3048_ucczto",
    "MVI_3064_ikvruc",
    "MVI_3065_ocue36",
    "MVI_3190_yhnpvc",
    "MVI_3217_xkdpgn",
];

/// Cloudinary resource type of a public id.
#[derive(Debug, Clone, Copy)]
enum Resource {
    Image,
    Video,
}

/// Delivery URL with automatic format and quality.
fn delivery_url(resource: Resource, public_id: &str) -> String {
    let kind = match resource {
        Resource::Image => "image",
        Resource::Video => "video",
    };
    format!("https://res.cloudinary.com/{CLOUD_NAME}/{kind}/upload/f_auto,q_auto/{public_id}")
}

fn photo(index: usize, public_id: &str) -> MediaItem {
    MediaItem::photo(
        format!("p{index}"),
        delivery_url(Resource::Image, public_id),
        format!("MEMORY #{}", index + 1),
        MEMORY_DATE,
    )
    .with_description(PHOTO_DESCRIPTION)
}

fn video(index: usize, public_id: &str) -> MediaItem {
    MediaItem::video(
        format!("v{index}"),
        delivery_url(Resource::Video, public_id),
        None,
        format!("VIDEO MEMORY #{}", index + 1),
        MEMORY_DATE,
    )
    .with_description(VIDEO_DESCRIPTION)
}

/// Builds the built-in album: all photos first, then all videos.
///
/// # Errors
///
/// Only fails if the compiled-in tables are inconsistent.
pub fn builtin_album() -> Result<Album, CatalogError> {
    let items = PHOTO_IDS
        .iter()
        .enumerate()
        .map(|(i, id)| photo(i, id))
        .chain(VIDEO_IDS.iter().enumerate().map(|(i, id)| video(i, id)))
        .collect();
    let tracks = TRACKS
        .iter()
        .map(|(title, url)| Track::new(*title, *url))
        .collect();
    Album::new(ALBUM_TITLE, ALBUM_SUBTITLE, MediaCatalog::new(items)?, tracks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::MediaKind;

    #[test]
    fn builtin_album_is_consistent() {
        let album = builtin_album().expect("built-in tables are valid");
        assert_eq!(album.title(), ALBUM_TITLE);
        assert_eq!(album.subtitle(), ALBUM_SUBTITLE);
        assert_eq!(album.catalog().len(), PHOTO_IDS.len() + VIDEO_IDS.len());
        assert_eq!(album.tracks().len(), 2);
        assert_eq!(album.tracks()[0].title(), "Abla (Memories)");
    }

    #[test]
    fn photos_come_before_videos() {
        let album = builtin_album().expect("valid");
        let catalog = album.catalog();
        let first = catalog.first().expect("not empty");
        assert_eq!(first.id().as_str(), "p0");
        assert_eq!(first.title(), "MEMORY #1");
        assert_eq!(first.date(), "OCT 2023");
        assert_eq!(
            first.url(),
            "https://res.cloudinary.com/dv9sf6jai/image/upload/f_auto,q_auto/IMG_3022_sbnd1a"
        );

        let first_video = catalog.item_at(PHOTO_IDS.len()).expect("videos follow");
        assert_eq!(first_video.id().as_str(), "v0");
        assert_eq!(first_video.title(), "VIDEO MEMORY #1");
        assert!(first_video.url().contains("/video/upload/"));
        assert!(matches!(first_video.kind(), MediaKind::Video { .. }));
        assert_eq!(first_video.description(), Some(VIDEO_DESCRIPTION));
    }

    #[test]
    fn last_video_wraps_to_first_photo() {
        let album = builtin_album().expect("valid");
        let catalog = album.catalog();
        let last = catalog.item_at(catalog.len() - 1).expect("not empty");
        let next = catalog.next(last.id()).expect("known id");
        assert_eq!(next.id().as_str(), "p0");
    }
}
