//! UI rendering tests
//!
//! Renders the full App into a TestBackend and checks what lands on screen
//! for the listing, trending strip, status bar and detail modal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};

use reeltui::app::{App, Request, Response, LIST_ERROR_MESSAGE};
use reeltui::models::{Movie, MovieDetail, TrendingEntry};
use reeltui::ui;

fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(width, height)).unwrap()
}

/// Render the app and return the screen as one string per row
fn render(app: &mut App, width: u16, height: u16) -> Vec<String> {
    let mut terminal = test_terminal(width, height);
    terminal.draw(|frame| ui::render(frame, app)).unwrap();

    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}

fn screen_contains(rows: &[String], needle: &str) -> bool {
    rows.iter().any(|row| row.contains(needle))
}

fn movie(id: u64, title: &str, year: &str, rating: f32) -> Movie {
    Movie {
        id,
        title: title.into(),
        poster_path: Some(format!("/{}.jpg", id)),
        vote_average: rating,
        release_date: Some(format!("{}-06-01", year)),
        original_language: Some("en".into()),
    }
}

/// App whose startup listing resolved to `movies`
fn app_with(movies: Vec<Movie>) -> App {
    let mut app = App::new();
    for request in app.take_requests() {
        match request {
            Request::FetchMovies { seq, term } => app.apply(Response::Movies {
                seq,
                term,
                result: Ok(movies.clone()),
            }),
            Request::LoadTrending { .. } => app.apply(Response::Trending(Ok(Vec::new()))),
            _ => {}
        }
    }
    app
}

// =============================================================================
// Listing
// =============================================================================

#[test]
fn test_popular_listing_renders_rows() {
    let mut app = app_with(vec![
        movie(1, "Blade Runner", "1982", 7.9),
        movie(2, "Arrival", "2016", 7.6),
    ]);
    let rows = render(&mut app, 80, 24);

    assert!(screen_contains(&rows, "REEL"));
    assert!(screen_contains(&rows, "Search through thousands of movies"));
    assert!(screen_contains(&rows, "POPULAR"));
    assert!(screen_contains(&rows, "Blade Runner"));
    assert!(screen_contains(&rows, "1982"));
    assert!(screen_contains(&rows, "7.9"));
    assert!(screen_contains(&rows, "EN"));
    assert!(screen_contains(&rows, "Arrival"));
    assert!(screen_contains(&rows, "NORMAL"));
    assert!(screen_contains(&rows, "2 movies"));
    assert!(!screen_contains(&rows, "TRENDING"));
}

#[test]
fn test_loading_listing_shows_spinner() {
    let mut app = App::new();
    let rows = render(&mut app, 80, 24);
    assert!(screen_contains(&rows, "Loading movies..."));
    assert!(screen_contains(&rows, "fetching"));
}

#[test]
fn test_empty_listing_says_no_movies() {
    let mut app = app_with(Vec::new());
    let rows = render(&mut app, 80, 24);
    assert!(screen_contains(&rows, "No movies found"));
    assert!(!screen_contains(&rows, LIST_ERROR_MESSAGE));
}

#[test]
fn test_failed_listing_shows_error() {
    let mut app = App::new();
    app.take_requests();
    app.apply(Response::Movies {
        seq: 1,
        term: String::new(),
        result: Err(anyhow::anyhow!("HTTP 503")),
    });

    let rows = render(&mut app, 100, 24);
    assert!(screen_contains(&rows, LIST_ERROR_MESSAGE));
    assert!(screen_contains(&rows, "offline"));
    assert!(!screen_contains(&rows, "HTTP 503"));
}

#[test]
fn test_search_title_and_insert_mode() {
    let mut app = app_with(vec![movie(1, "Dune", "2021", 7.8)]);
    app.handle_key(KeyEvent::new(KeyCode::Char('/'), KeyModifiers::empty()));
    for c in "dune".chars() {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::empty()));
    }

    let rows = render(&mut app, 80, 24);
    assert!(screen_contains(&rows, "INSERT"));
    assert!(screen_contains(&rows, "dune"));
    // Still showing the popular listing until the term commits
    assert!(screen_contains(&rows, "POPULAR"));
}

// =============================================================================
// Trending Strip
// =============================================================================

#[test]
fn test_trending_strip_visible_with_entries() {
    let mut app = app_with(vec![movie(1, "Dune", "2021", 7.8)]);
    app.apply(Response::Trending(Ok(vec![
        TrendingEntry {
            search_term: "dune".into(),
            count: 12,
            poster_url: String::new(),
            movie_id: Some(438631),
        },
        TrendingEntry {
            search_term: "arrival".into(),
            count: 4,
            poster_url: String::new(),
            movie_id: None,
        },
    ])));

    let rows = render(&mut app, 80, 24);
    assert!(screen_contains(&rows, "TRENDING"));
    assert!(screen_contains(&rows, "dune"));
    assert!(screen_contains(&rows, "×12"));
    assert!(screen_contains(&rows, "arrival"));
    assert!(screen_contains(&rows, "TAB:trending"));
}

#[test]
fn test_trending_failure_hides_strip() {
    let mut app = app_with(vec![movie(1, "Dune", "2021", 7.8)]);
    app.apply(Response::Trending(Err(anyhow::anyhow!("store offline"))));

    let rows = render(&mut app, 80, 24);
    assert!(!screen_contains(&rows, "TRENDING"));
    assert!(!screen_contains(&rows, "store offline"));
}

// =============================================================================
// Detail Modal
// =============================================================================

#[test]
fn test_modal_loading_then_loaded() {
    let mut app = app_with(vec![movie(438631, "Dune", "2021", 7.8)]);
    app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::empty()));

    let rows = render(&mut app, 100, 30);
    assert!(screen_contains(&rows, "DETAILS"));
    assert!(screen_contains(&rows, "Loading details..."));
    assert!(screen_contains(&rows, "ESC/q/x:close"));

    let (seq, id) = match app.take_requests().pop() {
        Some(Request::FetchDetail { seq, id }) => (seq, id),
        other => panic!("expected detail request, got {:?}", other),
    };
    app.apply(Response::Detail {
        seq,
        id,
        result: Ok(MovieDetail {
            id,
            title: "Dune".into(),
            release_date: Some("2021-09-15".into()),
            vote_average: 7.8,
            runtime: Some(155),
            genres: vec!["Science Fiction".into()],
            overview: "Paul Atreides travels to Arrakis.".into(),
            status: Some("Released".into()),
            budget: 165_000_000,
            ..Default::default()
        }),
    });

    let rows = render(&mut app, 100, 30);
    assert!(!screen_contains(&rows, "Loading details..."));
    assert!(screen_contains(&rows, "Science Fiction"));
    assert!(screen_contains(&rows, "Paul Atreides travels to Arrakis."));
    assert!(screen_contains(&rows, "2h 35m"));
    assert!(screen_contains(&rows, "Released"));
    assert!(screen_contains(&rows, "No tagline available"));
}

#[test]
fn test_modal_after_failed_detail_uses_listing_fields() {
    let mut app = app_with(vec![movie(7, "Arrival", "2016", 7.6)]);
    app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::empty()));
    app.apply(Response::Detail {
        seq: 1,
        id: 7,
        result: Err(anyhow::anyhow!("HTTP 500")),
    });

    let rows = render(&mut app, 100, 30);
    assert!(screen_contains(&rows, "Arrival"));
    assert!(screen_contains(&rows, "No overview available."));
    assert!(screen_contains(&rows, "No companies available"));
}

#[test]
fn test_modal_scroll_stays_on_text() {
    let mut app = app_with(vec![movie(7, "Arrival", "2016", 7.6)]);
    app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::empty()));
    app.apply(Response::Detail {
        seq: 1,
        id: 7,
        result: Ok(MovieDetail {
            id: 7,
            title: "Arrival".into(),
            tagline: Some("Why are they here?".into()),
            ..Default::default()
        }),
    });

    for _ in 0..200 {
        app.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::empty()));
    }
    let rows = render(&mut app, 100, 30);
    let scroll = app.modal.open().unwrap().scroll;
    assert!(scroll < 20, "scroll {} ran past the text", scroll);
    // The last line is still on screen
    assert!(screen_contains(&rows, "Production Companies"));

    // Scrolling back needs only as many steps as there are lines
    for _ in 0..scroll {
        app.handle_key(KeyEvent::new(KeyCode::Up, KeyModifiers::empty()));
    }
    let rows = render(&mut app, 100, 30);
    assert!(screen_contains(&rows, "Why are they here?"));
}

#[test]
fn test_closed_modal_not_rendered() {
    let mut app = app_with(vec![movie(7, "Arrival", "2016", 7.6)]);
    app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::empty()));
    app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::empty()));

    let rows = render(&mut app, 80, 24);
    assert!(!screen_contains(&rows, "DETAILS"));
    assert!(screen_contains(&rows, "Arrival"));
}

// =============================================================================
// Layout
// =============================================================================

#[test]
fn test_renders_at_small_and_large_sizes() {
    for (w, h) in [(40, 12), (80, 24), (200, 50)] {
        let mut app = app_with(vec![movie(1, "Heat", "1995", 8.3)]);
        let rows = render(&mut app, w, h);
        assert_eq!(rows.len(), h as usize);
        assert!(screen_contains(&rows, "Heat"), "missing row at {}x{}", w, h);
    }
}
