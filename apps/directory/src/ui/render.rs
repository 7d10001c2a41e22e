//! Plain-text rendering of a [`ViewModel`].

use std::fmt::Write as _;

use client_core::{Banner, Card, NavbarIndicator, ViewModel};

pub fn render_navbar(indicator: Option<&NavbarIndicator>) -> String {
    match indicator {
        None => "[ checking session... ]".to_string(),
        Some(NavbarIndicator::SignedOut) => "[ Log in ]".to_string(),
        Some(NavbarIndicator::SignedIn { avatar_url, name }) => match name {
            Some(name) => format!("[ {name} | {avatar_url} ]"),
            None => format!("[ Profile | {avatar_url} ]"),
        },
    }
}

pub fn render_view(view: &ViewModel, filter: &str) -> String {
    let mut out = String::new();

    if !view.breadcrumb.is_empty() {
        let crumbs: Vec<String> = view
            .breadcrumb
            .iter()
            .enumerate()
            .map(|(index, crumb)| match crumb.action {
                Some(_) => format!("{} (:c{})", crumb.label, index + 1),
                None => crumb.label.clone(),
            })
            .collect();
        let _ = writeln!(out, "{}", crumbs.join(" > "));
    }
    if let Some(back) = &view.back {
        let _ = writeln!(out, "< {} (:b)", back.label);
    }
    if let Some(heading) = &view.heading {
        let _ = writeln!(out, "\n== {} ==", heading.title);
        let _ = writeln!(out, "{}", heading.subtitle);
    }
    if let Some(banner) = &view.banner {
        let marker = match banner {
            Banner::Loading(_) => "...",
            Banner::Error(_) => "!!",
            Banner::Empty(_) => "--",
            Banner::Warning(_) => "!",
        };
        let _ = writeln!(out, "\n{marker} {}", banner.message());
    }

    if !view.cards.is_empty() {
        out.push('\n');
    }
    for (index, card) in view.cards.iter().enumerate() {
        let number = index + 1;
        match card {
            Card::College(card) => {
                let _ = writeln!(out, "{number:>3}. {}", card.name);
                let _ = writeln!(out, "     {}", card.blurb);
            }
            Card::Branch(card) => {
                let _ = writeln!(out, "{number:>3}. {}", card.branch);
                let _ = writeln!(out, "     {}", card.blurb);
            }
            Card::Alumni(card) => {
                let _ = writeln!(out, "{number:>3}. {}", card.name);
                let _ = writeln!(out, "     About: {}", card.about);
                let _ = writeln!(out, "     Graduation Year: {}", card.graduation_year);
                let _ = writeln!(out, "     Department: {}", card.department);
                let _ = writeln!(out, "     College: {}", card.college);
                if let Some(linkedin) = &card.linkedin {
                    let _ = writeln!(out, "     Connect on LinkedIn: {linkedin}");
                }
            }
        }
    }

    if !filter.is_empty() {
        let _ = writeln!(out, "\nfilter: {filter}");
    }
    out
}
