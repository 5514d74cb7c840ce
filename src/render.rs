//! HTML page rendering.
//!
//! Pages are generated with [maud](https://maud.lambda.xyz/), compile-time
//! HTML templates, rather than a runtime template engine. Malformed markup is
//! a build error, interpolation is auto-escaped, and there is no template
//! directory to ship or get out of sync with the binary.
//!
//! The renderer's contract is [`RenderContext`]: a tagged union of everything
//! a page can be built from. Both the HTTP handlers and the static exporter
//! go through [`render`], so a page looks the same whether it is served live
//! or written to disk.
//!
//! All URLs are site-root-absolute (`/`, `/projects/<title>.html`,
//! `/static/<path>`), which keeps served and exported pages identical — an
//! exported tree just needs to be mounted at a server root.
//!
//! One field is trusted: `Project::description` is pre-rendered HTML
//! (markdown-converted in directory mode, author-controlled in database mode)
//! and is injected unescaped. Every other field is escaped by maud.

use crate::project::Project;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS: &str = include_str!("style.css");

/// Everything a page can be rendered from.
pub enum RenderContext<'a> {
    /// The front page: the full registry snapshot.
    Index { projects: &'a [Project] },
    /// One project's detail page.
    Project { project: &'a Project },
    /// The 404 page for a slug with no matching project.
    NotFound { slug: &'a str },
}

/// Render a context to a complete HTML document.
pub fn render(ctx: &RenderContext<'_>) -> Markup {
    match ctx {
        RenderContext::Index { projects } => render_index(projects),
        RenderContext::Project { project } => render_project(project),
        RenderContext::NotFound { slug } => render_not_found(slug),
    }
}

// ============================================================================
// Layout
// ============================================================================

/// The base document every page is composed into.
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (CSS) }
            }
            body {
                header.site-header {
                    a href="/" { "Portfolio" }
                }
                (content)
            }
        }
    }
}

// ============================================================================
// Pages
// ============================================================================

fn render_index(projects: &[Project]) -> Markup {
    let content = html! {
        main.index-page {
            div.project-grid {
                @for project in projects {
                    // titles may contain spaces; the path segment must not
                    a.project-card href={ "/projects/" (urlencoding::encode(&project.title)) ".html" } {
                        @if !project.image_url.is_empty() {
                            img src={ "/static/" (project.image_url) } alt=(project.title) loading="lazy";
                        }
                        div.card-body {
                            h2 { (project.title) }
                            @if !project.short.is_empty() {
                                p.short { (project.short) }
                            }
                            @if !project.date.is_empty() {
                                span.date { (project.date) }
                            }
                        }
                    }
                }
            }
        }
    };
    base_document("Portfolio", content)
}

fn render_project(project: &Project) -> Markup {
    let content = html! {
        main.project-page {
            header {
                h1 { (project.title) }
                @if !project.date.is_empty() {
                    span.date { (project.date) }
                }
            }
            @if !project.image_url.is_empty() {
                img.project-image src={ "/static/" (project.image_url) } alt=(project.title);
            }
            article.description {
                (PreEscaped(project.description.as_str()))
            }
            p {
                a.back-link href="/" { "← All projects" }
            }
        }
    };
    base_document(&project.title, content)
}

fn render_not_found(slug: &str) -> Markup {
    let content = html! {
        main.not-found {
            h1 { "Project not found" }
            p { "No project is named " code { (slug) } "." }
            p {
                a.back-link href="/" { "← All projects" }
            }
        }
    };
    base_document("Not found", content)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(title: &str) -> Project {
        Project {
            title: title.to_string(),
            short: "A brief summary".to_string(),
            image_url: "img/alpha.png".to_string(),
            description: "<p>Long form <strong>content</strong>.</p>".to_string(),
            date: "2024-05-01".to_string(),
        }
    }

    #[test]
    fn index_lists_every_project() {
        let projects = vec![sample("alpha"), sample("beta")];
        let html = render(&RenderContext::Index {
            projects: &projects,
        })
        .into_string();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("alpha"));
        assert!(html.contains("beta"));
        assert!(html.contains(r#"href="/projects/alpha.html""#));
    }

    #[test]
    fn index_links_are_percent_encoded() {
        let projects = vec![sample("My Project 2024")];
        let html = render(&RenderContext::Index {
            projects: &projects,
        })
        .into_string();

        assert!(html.contains(r#"href="/projects/My%20Project%202024.html""#));
        assert!(!html.contains("/projects/My Project"));
        // the display title keeps its spaces
        assert!(html.contains("<h2>My Project 2024</h2>"));
    }

    #[test]
    fn index_cards_reference_static_images() {
        let projects = vec![sample("alpha")];
        let html = render(&RenderContext::Index {
            projects: &projects,
        })
        .into_string();

        assert!(html.contains(r#"src="/static/img/alpha.png""#));
    }

    #[test]
    fn empty_index_still_renders() {
        let html = render(&RenderContext::Index { projects: &[] }).into_string();
        assert!(html.contains("project-grid"));
    }

    #[test]
    fn project_page_includes_fields() {
        let project = sample("alpha");
        let html = render(&RenderContext::Project { project: &project }).into_string();

        assert!(html.contains("<title>alpha</title>"));
        assert!(html.contains("<h1>alpha</h1>"));
        assert!(html.contains("2024-05-01"));
    }

    #[test]
    fn description_is_injected_unescaped() {
        let project = sample("alpha");
        let html = render(&RenderContext::Project { project: &project }).into_string();

        assert!(html.contains("<strong>content</strong>"));
        assert!(!html.contains("&lt;strong&gt;"));
    }

    #[test]
    fn titles_are_escaped() {
        let mut project = sample("alpha");
        project.title = "a <script>alert(1)</script>".to_string();
        let html = render(&RenderContext::Project { project: &project }).into_string();

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn not_found_names_the_slug() {
        let html = render(&RenderContext::NotFound { slug: "missing" }).into_string();
        assert!(html.contains("Project not found"));
        assert!(html.contains("missing"));
    }

    #[test]
    fn optional_fields_omitted_when_empty() {
        let project = Project {
            title: "bare".to_string(),
            short: String::new(),
            image_url: String::new(),
            description: String::new(),
            date: String::new(),
        };
        let projects = vec![project.clone()];
        let index = render(&RenderContext::Index {
            projects: &projects,
        })
        .into_string();
        let page = render(&RenderContext::Project { project: &project }).into_string();

        // assert on markup, not the whole document: the inlined stylesheet
        // mentions these class names too
        assert!(!index.contains("<img"));
        assert!(!page.contains("<img"));
        assert!(!index.contains(r#"src="/static/"#));
    }
}
