//! Markdown topics: section splitting and a small line-based renderer.

use yew::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub body: String,
}

const INTRO_TITLE: &str = "Introduction";

/// `## Heading` text, or `None` for any other line (`#`, `###`, …).
fn level_two_heading(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("##")?;
    if rest.starts_with('#') {
        return None;
    }
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim())
}

/// Splits `content` on every level-two heading. Text before the first
/// heading becomes an "Introduction" section unless it is blank.
pub fn split_sections(content: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut title: Option<String> = None;
    let mut body: Vec<&str> = Vec::new();
    let mut in_fence = false;

    let mut flush = |title: Option<String>, body: &mut Vec<&str>| {
        let text = body.join("\n").trim().to_string();
        body.clear();
        match title {
            Some(t) => sections.push(Section { title: t, body: text }),
            None if !text.is_empty() => sections.push(Section { title: INTRO_TITLE.into(), body: text }),
            None => {}
        }
    };

    for line in content.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
        }
        match level_two_heading(line).filter(|_| !in_fence) {
            Some(heading) => {
                flush(title.take(), &mut body);
                title = Some(heading.to_string());
            }
            None => body.push(line),
        }
    }
    flush(title, &mut body);
    sections
}

/// Headings, bullet lists, fenced code and paragraphs; everything else is
/// shown as plain text.
pub fn render_markdown(text: &str) -> Html {
    let mut blocks: Vec<Html> = Vec::new();
    let mut bullets: Vec<String> = Vec::new();
    let mut code: Option<Vec<String>> = None;

    let flush_bullets = |bullets: &mut Vec<String>, blocks: &mut Vec<Html>| {
        if !bullets.is_empty() {
            let items = bullets.drain(..).map(|b| html!(<li>{ b }</li>));
            blocks.push(html!(<ul class="md-list">{ for items }</ul>));
        }
    };

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("```") {
            match code.take() {
                Some(lines) => blocks.push(html!(<pre class="md-code"><code>{ lines.join("\n") }</code></pre>)),
                None => {
                    flush_bullets(&mut bullets, &mut blocks);
                    code = Some(Vec::new());
                }
            }
            continue;
        }
        if let Some(lines) = code.as_mut() {
            lines.push(line.to_string());
            continue;
        }

        if let Some(item) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")) {
            bullets.push(item.trim().to_string());
            continue;
        }
        flush_bullets(&mut bullets, &mut blocks);

        if let Some(h) = trimmed.strip_prefix("### ") {
            blocks.push(html!(<h4>{ h.trim() }</h4>));
        } else if let Some(h) = trimmed.strip_prefix("## ") {
            blocks.push(html!(<h3>{ h.trim() }</h3>));
        } else if let Some(h) = trimmed.strip_prefix("# ") {
            blocks.push(html!(<h2>{ h.trim() }</h2>));
        } else if !trimmed.is_empty() {
            blocks.push(html!(<p>{ trimmed }</p>));
        }
    }
    flush_bullets(&mut bullets, &mut blocks);
    if let Some(lines) = code {
        blocks.push(html!(<pre class="md-code"><code>{ lines.join("\n") }</code></pre>));
    }

    html! { <div class="markdown">{ for blocks }</div> }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: &str, body: &str) -> Section {
        Section { title: title.into(), body: body.into() }
    }

    #[test]
    fn splits_on_level_two_headings() {
        assert_eq!(
            split_sections("## A\nfoo\n## B\nbar"),
            vec![section("A", "foo"), section("B", "bar")]
        );
    }

    #[test]
    fn deeper_headings_stay_in_the_body() {
        let sections = split_sections("## Arrays\nintro\n### Two pointers\ntext\n## Graphs\nbfs");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].body, "intro\n### Two pointers\ntext");
    }

    #[test]
    fn preamble_becomes_introduction_only_when_present() {
        let sections = split_sections("Welcome!\n\n## A\nfoo");
        assert_eq!(sections[0], section("Introduction", "Welcome!"));
        assert_eq!(sections.len(), 2);

        assert_eq!(split_sections("\n\n## A\nfoo").len(), 1);
    }

    #[test]
    fn headings_need_a_space_and_ignore_code_fences() {
        let sections = split_sections("## A\n```\n## not a heading\n```\n##B\n## C");
        assert_eq!(sections.len(), 2);
        assert!(sections[0].body.contains("## not a heading"));
        assert!(sections[0].body.contains("##B"));
        assert_eq!(sections[1], section("C", ""));
    }

    #[test]
    fn empty_content_has_no_sections() {
        assert!(split_sections("").is_empty());
        assert!(split_sections("   \n").is_empty());
    }
}
