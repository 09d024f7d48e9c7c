//! HTML rendering for the three pages.
//!
//! Pages are plain strings assembled from the handler outputs. Every value
//! that originates from a user or a provider goes through [`escape`].

use std::fmt::Write;

use crate::{
    models::{display_score, Genre, MovieRecord, WatchlistEntry},
    services::RecommendationBatch,
};

/// Browser script wiring the add/remove buttons to the JSON endpoints
pub const SCRIPT_JS: &str = include_str!("../../static/script.js");

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem; background: #141414; color: #eee; }
a { color: #e50914; }
form { margin-bottom: 2rem; }
input, select, button { padding: .5rem; margin-right: .5rem; }
.movies { display: flex; flex-wrap: wrap; gap: 1rem; }
.movie-card { width: 220px; background: #222; padding: 1rem; border-radius: 8px; }
.movie-card img { width: 100%; }
.movie-card iframe { width: 100%; height: 124px; border: 0; }
.notice { color: #f5c518; }
"#;

/// Minimal HTML escaping for text and attribute values
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{STYLE}</style>
<script src="/static/script.js" defer></script>
</head>
<body>
<nav><a href="/">Recommendations</a> | <a href="/watchlist">My Watchlist</a></nav>
{body}
</body>
</html>
"#,
        title = escape(title),
    )
}

fn query_form(query: &str, selected: Option<Genre>, genres: &[Genre]) -> String {
    let mut options = String::from(r#"<option value="">Any genre</option>"#);
    for genre in genres {
        let marker = if Some(*genre) == selected { " selected" } else { "" };
        let _ = write!(
            options,
            r#"<option value="{g}"{marker}>{g}</option>"#,
            g = escape(genre.as_str())
        );
    }

    format!(
        r#"<form method="post" action="/">
<input type="text" name="query" placeholder="Describe what you want to watch" value="{query}" required>
<select name="genre">{options}</select>
<button type="submit">Recommend</button>
</form>"#,
        query = escape(query),
    )
}

fn movie_card(movie: &MovieRecord) -> String {
    let rating = display_score(movie.rating);
    let popularity = display_score(movie.popularity);

    let trailer = movie
        .trailer
        .as_deref()
        .map(|url| {
            format!(
                r#"<iframe src="{}" title="Trailer" allowfullscreen></iframe>"#,
                escape(url)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="movie-card">
<img src="{poster}" alt="{title}">
<h3>{title}</h3>
<p>Rating: {rating}</p>
<p>Genre: {genre}</p>
<p>Popularity: {popularity}</p>
<p>Released: {release_year}</p>
<p>Language: {language}</p>
<p>Cast: {cast}</p>
{trailer}
<button class="add-watchlist" data-title="{title}" data-poster="{poster}" data-rating="{rating}" data-genre="{genre}" data-popularity="{popularity}" data-release_year="{release_year}" data-language="{language}" data-cast="{cast}">Add to Watchlist</button>
</div>"#,
        poster = escape(&movie.poster),
        title = escape(&movie.title),
        rating = escape(&rating),
        genre = escape(&movie.genre),
        popularity = escape(&popularity),
        release_year = escape(&movie.release_year),
        language = escape(&movie.language),
        cast = escape(&movie.cast),
    )
}

fn watchlist_card(entry: &WatchlistEntry) -> String {
    format!(
        r#"<div class="movie-card">
<img src="{poster}" alt="{title}">
<h3>{title}</h3>
<p>Rating: {rating}</p>
<p>Genre: {genre}</p>
<p>Popularity: {popularity}</p>
<p>Released: {release_year}</p>
<p>Language: {language}</p>
<p>Cast: {cast}</p>
<button class="remove-watchlist" data-id="{id}">Remove</button>
</div>"#,
        id = entry.id,
        poster = escape(&entry.poster),
        title = escape(&entry.title),
        rating = escape(&display_score(entry.rating)),
        genre = escape(&entry.genre),
        popularity = entry.popularity,
        release_year = escape(&entry.release_year),
        language = escape(&entry.language),
        cast = escape(&entry.cast),
    )
}

/// The empty query form
pub fn index_page(genres: &[Genre]) -> String {
    let body = format!(
        "<h1>Movie Recommendations</h1>\n{}",
        query_form("", None, genres)
    );
    layout("Movie Recommendations", &body)
}

/// Results for a submitted query, including a notice for dropped suggestions
pub fn recommendations_page(batch: &RecommendationBatch, genres: &[Genre]) -> String {
    let mut body = format!(
        "<h1>Recommendations for \"{}\"</h1>\n{}\n",
        escape(&batch.query),
        query_form(&batch.query, batch.genre, genres)
    );

    if batch.provider_error.is_some() {
        body.push_str(
            r#"<p class="notice">Recommendations could not be loaded right now.</p>"#,
        );
        body.push('\n');
    } else if batch.failed_count() > 0 {
        let _ = writeln!(
            body,
            r#"<p class="notice">{} recommendations could not be loaded.</p>"#,
            batch.failed_count()
        );
    }

    if batch.movies.is_empty() {
        body.push_str("<p>No movies found.</p>\n");
    } else {
        body.push_str(r#"<div class="movies">"#);
        for movie in &batch.movies {
            body.push_str(&movie_card(movie));
        }
        body.push_str("</div>\n");
    }

    layout("Recommendations", &body)
}

/// Every saved entry
pub fn watchlist_page(entries: &[WatchlistEntry]) -> String {
    let mut body = String::from("<h1>My Watchlist</h1>\n");

    if entries.is_empty() {
        body.push_str("<p>Your watchlist is empty.</p>\n");
    } else {
        body.push_str(r#"<div class="movies">"#);
        for entry in entries {
            body.push_str(&watchlist_card(entry));
        }
        body.push_str("</div>\n");
    }

    layout("My Watchlist", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::recommendations::{LookupFailure, UnresolvedCandidate};

    fn interstellar() -> MovieRecord {
        MovieRecord {
            title: "Interstellar".to_string(),
            poster: "https://image.tmdb.org/t/p/w500/interstellar.jpg".to_string(),
            rating: Some(8.4),
            genre: "Adventure, Drama, Science Fiction".to_string(),
            popularity: None,
            release_year: "2014".to_string(),
            language: "en".to_string(),
            cast: "Matthew McConaughey, Anne Hathaway".to_string(),
            trailer: Some("https://www.youtube.com/embed/zSWdZVtXT7E".to_string()),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>"Tom & Jerry's"</script>"#),
            "&lt;script&gt;&quot;Tom &amp; Jerry&#x27;s&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_index_lists_all_genres() {
        let html = index_page(&Genre::ALL);
        assert!(html.starts_with("<!DOCTYPE html>"));
        for genre in Genre::ALL {
            assert!(html.contains(&format!(r#"<option value="{}">"#, genre)));
        }
    }

    #[test]
    fn test_recommendations_render_fields_and_trailer() {
        let batch = RecommendationBatch {
            query: "space adventure".to_string(),
            genre: Some(Genre::SciFi),
            candidate_count: 1,
            movies: vec![interstellar()],
            ..Default::default()
        };

        let html = recommendations_page(&batch, &Genre::ALL);

        assert!(html.contains("<h3>Interstellar</h3>"));
        assert!(html.contains("Rating: 8.4"));
        assert!(html.contains("Popularity: N/A"));
        assert!(html.contains("Released: 2014"));
        assert!(html.contains("https://www.youtube.com/embed/zSWdZVtXT7E"));
        assert!(html.contains(r#"<option value="Sci-Fi" selected>"#));
        assert!(!html.contains("could not be loaded"));
    }

    #[test]
    fn test_recommendations_notice_for_failures() {
        let batch = RecommendationBatch {
            query: "space adventure".to_string(),
            candidate_count: 3,
            movies: vec![interstellar()],
            unresolved: vec![
                UnresolvedCandidate {
                    title: "Nope".to_string(),
                    failure: LookupFailure::NoMatch,
                },
                UnresolvedCandidate {
                    title: "Broken".to_string(),
                    failure: LookupFailure::Failed("timeout".to_string()),
                },
            ],
            ..Default::default()
        };

        let html = recommendations_page(&batch, &Genre::ALL);
        assert!(html.contains("2 recommendations could not be loaded."));
    }

    #[test]
    fn test_empty_results_render_page_not_error() {
        let batch = RecommendationBatch {
            query: "nothing".to_string(),
            ..Default::default()
        };

        let html = recommendations_page(&batch, &Genre::ALL);
        assert!(html.contains("No movies found."));
    }

    #[test]
    fn test_query_is_escaped() {
        let batch = RecommendationBatch {
            query: "<b>bold</b>".to_string(),
            ..Default::default()
        };

        let html = recommendations_page(&batch, &Genre::ALL);
        assert!(!html.contains("<b>bold</b>"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn test_watchlist_page_has_remove_buttons() {
        let entry = WatchlistEntry {
            id: 7,
            title: "Dune".to_string(),
            poster: "https://via.placeholder.com/200x300".to_string(),
            rating: None,
            genre: "N/A".to_string(),
            popularity: 0.0,
            release_year: "Unknown".to_string(),
            language: "N/A".to_string(),
            cast: "N/A".to_string(),
        };

        let html = watchlist_page(&[entry]);
        assert!(html.contains(r#"data-id="7""#));
        assert!(html.contains("<h3>Dune</h3>"));
    }

    #[test]
    fn test_script_targets_endpoints() {
        assert!(SCRIPT_JS.contains("/add_watchlist"));
        assert!(SCRIPT_JS.contains("/remove_watchlist/"));
    }
}
