// Home view.
// Hero, page sections, carousel, featured articles, cards and staff.

use ratatui::prelude::*;

use crate::site::HomeData;

use super::{heading, muted};

pub fn render_home(home: &HomeData) -> Text<'static> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    if let Some(hero) = home.page.as_ref().and_then(|page| page.hero()) {
        if let Some(title) = &hero.title {
            lines.push(Line::from(Span::styled(
                title.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        if let Some(subtitle) = &hero.subtitle {
            lines.push(Line::from(subtitle.clone()));
        }
        lines.push(Line::default());
    }

    if !home.carousel.is_empty() {
        let labels: Vec<&str> = home.carousel.iter().map(|image| image.label()).collect();
        lines.push(Line::from(vec![
            muted("Gallery: "),
            Span::raw(labels.join(" | ")),
        ]));
        lines.push(Line::default());
    }

    if let Some(page) = &home.page {
        for section in &page.sections {
            lines.push(heading(section.title.clone().unwrap_or_else(|| section.id.to_string())));
            if let Some(content) = &section.content {
                lines.extend(content.lines().map(|l| Line::from(l.to_string())));
            }
            lines.push(Line::default());
        }
    }

    if !home.featured.is_empty() {
        lines.push(heading("Featured"));
        for article in &home.featured {
            let mut spans = vec![Span::raw("• "), Span::raw(article.title.clone())];
            if let Some(excerpt) = &article.excerpt {
                spans.push(muted(format!("  {}", excerpt)));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::default());
    }

    if !home.cards.is_empty() {
        lines.push(heading("Highlights"));
        for card in &home.cards {
            let mut spans = vec![Span::styled(
                card.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            if let Some(description) = &card.description {
                spans.push(Span::raw(format!(": {}", description)));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::default());
    }

    if !home.staff.is_empty() {
        lines.push(heading("Our team"));
        for member in &home.staff {
            let mut spans = vec![Span::raw(member.name.clone())];
            if let Some(role) = &member.role {
                spans.push(muted(format!(", {}", role)));
            }
            lines.push(Line::from(spans));
        }
    }

    if lines.is_empty() {
        lines.push(muted("Nothing to show yet").into());
    }

    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Card, CarouselImage, ContentId, Hero, PageContent, Section, StaffMember};
    use crate::views::to_plain;

    #[test]
    fn test_home_sections_in_order() {
        let home = HomeData {
            page: Some(PageContent {
                hero: Some(Hero {
                    title: Some("Welcome".to_string()),
                    subtitle: Some("A place for everyone".to_string()),
                    ..Hero::default()
                }),
                sections: vec![Section {
                    id: ContentId::from("mission"),
                    title: None,
                    content: Some("Line one\nLine two".to_string()),
                    extra: Default::default(),
                }],
                extra: Default::default(),
            }),
            carousel: vec![CarouselImage {
                src: "/img/1.jpg".to_string(),
                alt: None,
                caption: Some("Summer fair".to_string()),
            }],
            featured: Vec::new(),
            cards: vec![Card {
                id: ContentId::Number(1),
                title: "Programs".to_string(),
                description: Some("After-school clubs".to_string()),
                image_url: None,
                link: None,
            }],
            staff: vec![StaffMember {
                id: None,
                name: "Ana Ruiz".to_string(),
                role: Some("Director".to_string()),
                bio: None,
                image_url: None,
                email: None,
            }],
        };

        let plain = to_plain(&render_home(&home));
        let order = [
            "Welcome",
            "Gallery: Summer fair",
            "mission",
            "Line two",
            "Programs: After-school clubs",
            "Ana Ruiz, Director",
        ];
        let positions: Vec<usize> = order.iter().map(|s| plain.find(s).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!plain.contains("Featured"));
    }

    #[test]
    fn test_empty_home() {
        let plain = to_plain(&render_home(&HomeData::default()));
        assert_eq!(plain, "Nothing to show yet");
    }
}
