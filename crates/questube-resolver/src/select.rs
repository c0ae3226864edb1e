use questube_core::{MediaFormat, MediaInfo, SelectError};
use std::collections::HashSet;

/// Container extensions the embedded Quest player handles natively.
pub fn default_containers() -> HashSet<String> {
    HashSet::from(["mp4".to_owned()])
}

/// Picks the variant to redirect to, in a single pass over the resolver's
/// own ordering.
///
/// Among formats with an acceptable container, the LAST one carrying both
/// tracks wins; yt-dlp lists progressively better variants later, so the
/// last complete match is the best one. This ordering is an observed
/// behavior of the resolver, not a documented contract. When no complete
/// acceptable format exists the first acceptable one is used, and failing
/// that the very first format of any container, so callers still get
/// something playable whenever the list is non-empty.
pub fn select_format<'a>(
    info: &'a MediaInfo,
    containers: &HashSet<String>,
) -> Result<&'a MediaFormat, SelectError> {
    let mut best_complete: Option<&MediaFormat> = None;
    let mut first_acceptable: Option<&MediaFormat> = None;

    for format in &info.formats {
        if !containers.contains(&format.ext) {
            continue;
        }
        if first_acceptable.is_none() {
            first_acceptable = Some(format);
        }
        if format.is_complete() {
            best_complete = Some(format);
        }
    }

    best_complete
        .or(first_acceptable)
        .or_else(|| info.formats.first())
        .ok_or(SelectError::NoFormatAvailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(id: &str, ext: &str, vcodec: &str, acodec: &str) -> MediaFormat {
        MediaFormat {
            format_id: id.to_owned(),
            ext: ext.to_owned(),
            url: format!("https://cdn.example/{id}"),
            vcodec: vcodec.to_owned(),
            acodec: acodec.to_owned(),
        }
    }

    fn media(formats: Vec<MediaFormat>) -> MediaInfo {
        MediaInfo {
            id: "x".to_owned(),
            title: String::new(),
            description: String::new(),
            duration: None,
            webpage_url: String::new(),
            formats,
        }
    }

    #[test]
    fn picks_only_complete_acceptable_format() {
        let info = media(vec![
            format("137", "mp4", "h264", "none"),
            format("22", "mp4", "h264", "aac"),
            format("248", "webm", "vp9", "opus"),
        ]);

        let selected = select_format(&info, &default_containers()).unwrap();
        assert_eq!(selected.format_id, "22");
    }

    #[test]
    fn last_complete_acceptable_format_wins() {
        let info = media(vec![
            format("18", "mp4", "h264", "aac"),
            format("22", "mp4", "h264", "aac"),
            format("137", "mp4", "h264", "none"),
        ]);

        let selected = select_format(&info, &default_containers()).unwrap();
        assert_eq!(selected.format_id, "22");
    }

    #[test]
    fn falls_back_to_first_acceptable_incomplete() {
        let info = media(vec![
            format("137", "mp4", "h264", "none"),
            format("140", "mp4", "none", "aac"),
            format("248", "webm", "vp9", "opus"),
        ]);

        let selected = select_format(&info, &default_containers()).unwrap();
        assert_eq!(selected.format_id, "137");
    }

    #[test]
    fn falls_back_to_first_format_of_any_container() {
        let info = media(vec![
            format("248", "webm", "vp9", "opus"),
            format("251", "webm", "none", "opus"),
        ]);

        let selected = select_format(&info, &default_containers()).unwrap();
        assert_eq!(selected.format_id, "248");
    }

    #[test]
    fn empty_list_has_no_format() {
        let info = media(Vec::new());
        let err = select_format(&info, &default_containers()).unwrap_err();
        assert!(matches!(err, SelectError::NoFormatAvailable));
    }

    #[test]
    fn selection_is_deterministic() {
        let info = media(vec![
            format("18", "mp4", "h264", "aac"),
            format("248", "webm", "vp9", "opus"),
            format("22", "mp4", "h264", "aac"),
        ]);

        let containers = default_containers();
        let first = select_format(&info, &containers).unwrap().format_id.clone();
        for _ in 0..10 {
            assert_eq!(select_format(&info, &containers).unwrap().format_id, first);
        }
    }
}
