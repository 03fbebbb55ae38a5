use docweave_traits::{Location, ResolveError, UriResolver};

/// Scheme of archive entry locations: `jar:<archive-url>!/<entry-path>`.
pub const ARCHIVE_SCHEME: &str = "jar";
const ENTRY_SEPARATOR: &str = "!/";

/// Resolves relative references made from inside an archive.
///
/// Archive entry URLs cannot act as a base for ordinary URL joining, so an
/// `xsl:import href="../common/common.xsl"` inside a packaged stylesheet
/// would otherwise go nowhere. The reference is joined against the entry
/// path and the archive part is carried over unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct RelativeArchiveResolver;

impl RelativeArchiveResolver {
    pub fn new() -> Self {
        Self
    }
}

/// Joins `href` onto the directory of `entry`, folding `.` and `..`.
///
/// Returns `None` when `..` climbs above the archive root.
fn join_entry_path(entry: &str, href: &str) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();
    if !href.starts_with('/')
        && let Some((dir, _file)) = entry.rsplit_once('/')
    {
        segments.extend(dir.split('/').filter(|s| !s.is_empty()));
    }

    for segment in href.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }
    Some(segments.join("/"))
}

impl UriResolver for RelativeArchiveResolver {
    fn resolve(&self, href: &str, base: Option<&str>) -> Result<Option<Location>, ResolveError> {
        let Some(base) = base else {
            return Ok(None);
        };
        // `//host/...` names another authority, not an entry of this archive
        if !Location::is_relative_reference(href) || href.starts_with("//") {
            return Ok(None);
        }
        let Some((archive, entry)) = base
            .strip_prefix(ARCHIVE_SCHEME)
            .and_then(|rest| rest.strip_prefix(':'))
            .and_then(|rest| rest.split_once(ENTRY_SEPARATOR))
        else {
            return Ok(None);
        };

        let joined = join_entry_path(entry, href).ok_or_else(|| ResolveError::InvalidReference {
            reference: href.to_string(),
            message: format!("climbs out of archive {archive}"),
        })?;

        let location = Location::parse(&format!(
            "{ARCHIVE_SCHEME}:{archive}{ENTRY_SEPARATOR}{joined}"
        ))?;
        Ok(Some(location))
    }

    fn name(&self) -> &'static str {
        "RelativeArchiveResolver"
    }
}
