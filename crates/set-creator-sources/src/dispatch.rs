//! Provider selection from a list URL
//!
//! Each supported URL prefix maps to exactly one [`ListSource`] variant,
//! carrying whatever the matching fetcher needs (API path, JSON endpoint,
//! TMDb ID, IMDb page kind). Anything else is rejected up front, before any
//! request is made.
use crate::error::SourceError;
use reqwest::Url;

const TRAKT_PREFIX: &str = "https://trakt.tv/";
const MDBLIST_PREFIX: &str = "https://mdblist.com/lists/";
const TMDB_PREFIX: &str = "https://www.themoviedb.org/";
const IMDB_PREFIX: &str = "https://www.imdb.com/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListSource {
    Trakt { list_url: String, path: String },
    MdbList(MdbListTarget),
    Tmdb { list_url: String, target: TmdbTarget },
    Imdb(ImdbTarget),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TmdbTarget {
    Collection(u32),
    /// A movie page; the list is the collection the movie belongs to
    Movie(u32),
    List(u32),
}

impl TmdbTarget {
    pub fn id(&self) -> u32 {
        match self {
            TmdbTarget::Collection(id) | TmdbTarget::Movie(id) | TmdbTarget::List(id) => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MdbListTarget {
    pub list_url: String,
    /// `<list url>/json/`, without query
    pub json_url: Url,
    /// `sort` / `sortorder` carried over from the list URL
    pub params: Vec<(String, String)>,
}

impl MdbListTarget {
    pub fn from_list_url(list_url: &str) -> Result<Self, SourceError> {
        let mut url = parse_url(list_url)?;
        let params = url
            .query_pairs()
            .filter(|(k, _)| k == "sort" || k == "sortorder")
            .fold(Vec::<(String, String)>::new(), |mut acc, (k, v)| {
                // first value wins, like a parsed query string
                if !acc.iter().any(|(existing, _)| existing.as_str() == k) {
                    acc.push((k.into_owned(), v.into_owned()));
                }
                acc
            });
        url.set_query(None);
        url.set_fragment(None);

        let mut path = url.path().to_string();
        if !path.ends_with('/') {
            path.push('/');
        }
        if !path.ends_with("json/") {
            path.push_str("json/");
        }
        url.set_path(&path);

        Ok(Self {
            list_url: list_url.to_string(),
            json_url: url,
            params,
        })
    }
}

/// IMDb page flavours; they differ in where the total count lives, how many
/// items a page holds and how pages are addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImdbListKind {
    /// `/list/ls...`
    List,
    /// `/search/title/`
    Search,
    /// `/search/title-text/`
    TitleText,
    Other,
}

impl ImdbListKind {
    pub fn from_url(url: &str) -> Self {
        if url.starts_with("https://www.imdb.com/list/ls") {
            ImdbListKind::List
        } else if url.starts_with("https://www.imdb.com/search/title/") {
            ImdbListKind::Search
        } else if url.starts_with("https://www.imdb.com/search/title-text/") {
            ImdbListKind::TitleText
        } else {
            ImdbListKind::Other
        }
    }

    pub fn page_size(&self) -> usize {
        match self {
            ImdbListKind::List => 100,
            ImdbListKind::Search => 250,
            ImdbListKind::TitleText | ImdbListKind::Other => 50,
        }
    }

    /// CSS selector of the element holding "1,234 titles"
    pub fn total_selector(&self) -> &'static str {
        match self {
            ImdbListKind::List => "div.desc.lister-total-num-results",
            ImdbListKind::Search | ImdbListKind::TitleText => "div.desc span",
            ImdbListKind::Other => "div.desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImdbTarget {
    pub list_url: String,
    /// List URL without query; page params are appended per request
    pub base_url: Url,
    /// Original query minus `start`, `count` and `page`
    pub params: Vec<(String, String)>,
    pub kind: ImdbListKind,
}

impl ImdbTarget {
    pub fn new(list_url: &str, kind: ImdbListKind) -> Result<Self, SourceError> {
        let mut base_url = parse_url(list_url)?;
        let params = base_url
            .query_pairs()
            .filter(|(k, _)| !matches!(&**k, "start" | "count" | "page"))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        base_url.set_query(None);
        base_url.set_fragment(None);
        Ok(Self {
            list_url: list_url.to_string(),
            base_url,
            params,
            kind,
        })
    }
}

impl ListSource {
    pub fn parse(url: &str) -> Result<Self, SourceError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(SourceError::NoUrl);
        }

        if url.starts_with(TRAKT_PREFIX) {
            let parsed = parse_url(url)?;
            let path = parsed.path().replace("/official/", "/");
            let path = path.trim_end_matches('/').to_string();
            Ok(ListSource::Trakt {
                list_url: url.to_string(),
                path,
            })
        } else if url.starts_with(MDBLIST_PREFIX) {
            Ok(ListSource::MdbList(MdbListTarget::from_list_url(url)?))
        } else if url.starts_with(TMDB_PREFIX) {
            Ok(ListSource::Tmdb {
                list_url: url.to_string(),
                target: parse_tmdb_target(url)?,
            })
        } else if url.starts_with(IMDB_PREFIX) {
            Ok(ListSource::Imdb(ImdbTarget::new(url, ImdbListKind::from_url(url))?))
        } else {
            Err(SourceError::InvalidUrl(url.to_string()))
        }
    }

    pub fn provider_name(&self) -> &'static str {
        match self {
            ListSource::Trakt { .. } => "Trakt",
            ListSource::MdbList(_) => "MDbList",
            ListSource::Tmdb { .. } => "TMDb",
            ListSource::Imdb(_) => "IMDb",
        }
    }

    pub fn list_url(&self) -> &str {
        match self {
            ListSource::Trakt { list_url, .. } | ListSource::Tmdb { list_url, .. } => list_url,
            ListSource::MdbList(target) => &target.list_url,
            ListSource::Imdb(target) => &target.list_url,
        }
    }
}

fn parse_url(url: &str) -> Result<Url, SourceError> {
    Url::parse(url).map_err(|_| SourceError::InvalidUrl(url.to_string()))
}

fn parse_tmdb_target(url: &str) -> Result<TmdbTarget, SourceError> {
    let path = &url[TMDB_PREFIX.len()..];
    // first run of digits anywhere in the path
    let id = path
        .split(|c: char| !c.is_ascii_digit())
        .find(|run| !run.is_empty())
        .and_then(|run| run.parse::<u32>().ok())
        .ok_or_else(|| {
            SourceError::ParseUrl(format!("Regex Error: Failed to parse TMDb ID from {}", url))
        })?;

    if path.starts_with("collection/") {
        Ok(TmdbTarget::Collection(id))
    } else if path.starts_with("movie/") {
        Ok(TmdbTarget::Movie(id))
    } else if path.starts_with("list/") {
        Ok(TmdbTarget::List(id))
    } else {
        Err(SourceError::ParseUrl(format!("TMDb Error: Failed to parse URL: {}", url)))
    }
}
