use super::index::CatalogIndex;
use super::model::Album;

/// Group consecutive albums by performer (case-insensitively).
///
/// The first album of each run names the group.
pub fn group_by_performer<'a>(albums: &[&'a Album]) -> Vec<(&'a str, Vec<&'a Album>)> {
    let mut groups: Vec<(&'a str, Vec<&'a Album>)> = Vec::new();
    for &album in albums {
        let key = album.performer.to_lowercase();
        if let Some((_, list)) = groups
            .last_mut()
            .filter(|(name, _)| name.to_lowercase() == key)
        {
            list.push(album);
        } else {
            groups.push((album.performer.as_str(), vec![album]));
        }
    }
    groups
}

/// Render performer groups as
///
/// ```text
/// Queen:
///     1975 - A Night at the Opera
/// ```
pub fn render_groups<'a, I>(groups: I) -> String
where
    I: IntoIterator<Item = (&'a str, Vec<&'a Album>)>,
{
    let mut lines: Vec<String> = Vec::new();
    for (performer, albums) in groups {
        lines.push(format!("{performer}:"));
        for album in albums {
            lines.push(format!("    {album}"));
        }
    }
    lines.join("\n")
}

/// Listing of the whole index, or a note that it is empty.
pub fn render_index(index: &CatalogIndex) -> String {
    if index.is_empty() {
        return "Library is empty".to_string();
    }
    render_groups(
        index
            .shelves()
            .map(|s| (s.name.as_str(), s.albums.iter().collect())),
    )
}
