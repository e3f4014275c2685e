//! Widgets for a rendered [`ReportView`].

use iced::{
    Color, Element, Font, Length,
    font::Weight,
    widget::{Column, button, column, container, row, text},
};
use resumo_core::{Block, CalloutKind, ReportView, view::RenderedSection};

use crate::Message;

const MUTED: Color = Color::from_rgb(0.45, 0.45, 0.50);
const TIP: Color = Color::from_rgb(0.70, 0.50, 0.05);
const EXAMPLE: Color = Color::from_rgb(0.15, 0.40, 0.75);

fn bold() -> Font {
    Font {
        weight: Weight::Bold,
        ..Font::DEFAULT
    }
}

fn block_view(block: &Block) -> Element<'static, Message> {
    match block {
        Block::Heading(title) => text(title.clone()).size(16).font(bold()).into(),
        Block::Paragraph(body) => text(body.clone()).size(14).into(),
        Block::Field { label, value } => row![
            text(format!("{}:", label)).size(14).font(bold()),
            text(value.clone()).size(14),
        ]
        .spacing(6)
        .into(),
        Block::Callout { kind, label, text: body } => {
            let color = match kind {
                CalloutKind::Tip => TIP,
                CalloutKind::Example | CalloutKind::MemoryTechnique => EXAMPLE,
            };
            container(
                column![
                    text(label.clone()).size(13).font(bold()).color(color),
                    text(body.clone()).size(14),
                ]
                .spacing(2),
            )
            .padding([6, 12])
            .into()
        }
        Block::List {
            label,
            ordered,
            items,
        } => {
            let mut list = Column::new()
                .spacing(2)
                .push(text(format!("{}:", label)).size(14).font(bold()));
            for (i, item) in items.iter().enumerate() {
                let line = if *ordered {
                    format!("{}. {}", i + 1, item)
                } else {
                    format!("• {}", item)
                };
                list = list.push(text(line).size(14));
            }
            list.into()
        }
    }
}

fn section_view(section: &RenderedSection) -> Element<'static, Message> {
    let header: Element<'static, Message> = match section.section.key() {
        Some(key) => {
            let marker = if section.open { "▾" } else { "▸" };
            button(text(format!("{} {}", marker, section.title)).size(18).font(bold()))
                .style(button::text)
                .padding(0)
                .on_press(Message::ToggleSection(key))
                .into()
        }
        None => text(section.title.clone()).size(18).font(bold()).into(),
    };

    let mut body = Column::new().spacing(6).push(header);
    for block in &section.blocks {
        body = body.push(block_view(block));
    }
    body.into()
}

/// The report header and every section, collapsed ones as header only.
pub fn report_view(view: &ReportView) -> Element<'static, Message> {
    let header = view.header();
    let mut content = Column::new()
        .spacing(18)
        .width(Length::Fill)
        .push(
            row![
                text(header.title).size(24).font(bold()),
                text(header.word_count).size(14).color(MUTED),
            ]
            .spacing(12)
            .align_y(iced::Alignment::End),
        );

    for section in view.render() {
        content = content.push(section_view(&section));
    }
    content.into()
}
