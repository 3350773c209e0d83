//! The portfolio's routing table and page content.

use wheelnav_core::location::normalize;
use wheelnav_core::{Section, SectionIndex, SectionIndexError};

/// Project detail pages, served under `/projects/<id>`.
pub const PROJECTS: &[(&str, &str)] = &[
    ("1", "Terrain renderer"),
    ("2", "Flashcard scheduler"),
    ("3", "Static site generator"),
];

/// The navigable sections, in rail order.
pub fn portfolio() -> Result<SectionIndex, SectionIndexError> {
    SectionIndex::new(vec![
        Section::new("home", "Home", "/"),
        Section::new("projects", "Projects", "/projects"),
        Section::new("gallery", "Gallery", "/gallery"),
        Section::new("flashcards", "Flashcards", "/flashcards"),
        Section::new("resume", "Resume", "/resume"),
        Section::new("store", "Store", "/store"),
        Section::new("notebook", "Notebook", "/notebook"),
    ])
}

/// A rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub lines: Vec<String>,
}

fn filler(topic: &str, count: usize) -> impl Iterator<Item = String> + '_ {
    (1..=count).map(move |n| format!("{topic} entry {n}: lorem ipsum dolor sit amet"))
}

/// Resolve `location` to its page; unknown locations get a not-found page.
pub fn page_for(location: &str) -> Page {
    let path = normalize(location);
    let (title, lines): (&str, Vec<String>) = match path {
        "/" => (
            "Home",
            std::iter::once("Welcome. Scroll the rail or press Tab to reach it.".to_owned())
                .chain(filler("News", 30))
                .collect(),
        ),
        "/projects" => (
            "Projects",
            PROJECTS
                .iter()
                .map(|(id, name)| format!("[{id}] {name}  (/projects/{id})"))
                .chain(std::iter::once("Press a number to open a project.".to_owned()))
                .collect(),
        ),
        "/gallery" => ("Gallery", filler("Photo", 40).collect()),
        "/flashcards" => ("Flashcards", filler("Deck", 12).collect()),
        "/resume" => ("Resume", filler("Role", 20).collect()),
        "/store" => ("Store", filler("Item", 25).collect()),
        "/notebook" => ("Notebook", filler("Note", 50).collect()),
        other => match other
            .strip_prefix("/projects/")
            .and_then(|id| PROJECTS.iter().find(|(pid, _)| *pid == id))
        {
            Some((id, name)) => {
                return Page {
                    title: format!("Project {id}: {name}"),
                    lines: std::iter::once("Backspace returns to Projects.".to_owned())
                        .chain(filler("Detail", 30))
                        .collect(),
                };
            }
            None => (
                "Not found",
                vec![format!("Nothing lives at {other}."), "Press Backspace to go home.".to_owned()],
            ),
        },
    };
    Page {
        title: title.to_owned(),
        lines,
    }
}

/// Where Backspace leads from `location`.
pub fn parent_of(location: &str) -> &str {
    let path = normalize(location);
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(i) => &path[..i],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portfolio_is_valid() {
        let index = portfolio().unwrap();
        assert_eq!(index.len(), 7);
        assert_eq!(index.get(0).unwrap().target, "/");
    }

    #[test]
    fn project_detail_pages_resolve() {
        assert_eq!(page_for("/projects/2").title, "Project 2: Flashcard scheduler");
        assert_eq!(page_for("/projects/9").title, "Not found");
        assert_eq!(page_for("/gallery/?x=1").title, "Gallery");
    }

    #[test]
    fn parents() {
        assert_eq!(parent_of("/projects/2"), "/projects");
        assert_eq!(parent_of("/projects"), "/");
        assert_eq!(parent_of("/"), "/");
    }
}
