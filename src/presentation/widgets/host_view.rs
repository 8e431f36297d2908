//! Host display list widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::domain::entities::{Host, HostChild, HostEffect, Overlay, OverlayKind, View};

/// Views below this opacity are not drawn.
const MIN_VISIBLE_OPACITY: f32 = 0.05;

/// Views below this opacity are drawn dimmed.
const DIM_OPACITY: f32 = 0.6;

const LOADING_TEXT: &str = " Loading… ";

pub struct HostViewStyle {
    pub border: Style,
    pub title: Style,
    pub body: Style,
    pub style_class: Style,
    pub loading: Style,
}

impl Default for HostViewStyle {
    fn default() -> Self {
        Self {
            border: Style::default().fg(Color::Cyan),
            title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            body: Style::default().fg(Color::White),
            style_class: Style::default().fg(Color::DarkGray),
            loading: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// Renders every child of a [`Host`] bottom to top.
pub struct HostView<'a> {
    host: &'a Host,
    style: HostViewStyle,
}

impl<'a> HostView<'a> {
    #[must_use]
    pub fn new(host: &'a Host) -> Self {
        Self {
            host,
            style: HostViewStyle::default(),
        }
    }

    #[must_use]
    pub fn style(mut self, style: HostViewStyle) -> Self {
        self.style = style;
        self
    }

    fn render_screen(&self, view: &View, area: Rect, buf: &mut Buffer) {
        let transform = view.transform;
        if transform.opacity < MIN_VISIBLE_OPACITY {
            return;
        }

        let target = translated(area, transform.translate_x, transform.translate_y);
        if target.area() == 0 {
            return;
        }

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.style.border)
            .title(Line::styled(format!(" {} ", view.title), self.style.title));
        if !view.style_classes.is_empty() {
            block = block.title_bottom(
                Line::styled(format!(" .{} ", view.style_classes.join(" .")), self.style.style_class)
                    .right_aligned(),
            );
        }

        let lines: Vec<Line> = view
            .body
            .iter()
            .map(|line| Line::styled(line.as_str(), self.style.body))
            .collect();

        Clear.render(target, buf);
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(target, buf);

        if transform.opacity < DIM_OPACITY {
            buf.set_style(target, Style::default().add_modifier(Modifier::DIM));
        }
    }

    fn render_overlay(&self, overlay: &Overlay, area: Rect, buf: &mut Buffer) {
        match overlay.kind {
            OverlayKind::Shade => {
                buf.set_style(area, Style::default().bg(Color::Black));
            }
            OverlayKind::LoadingIndicator => {
                let width = u16::try_from(LOADING_TEXT.width())
                    .unwrap_or(u16::MAX)
                    .saturating_add(2)
                    .min(area.width);
                let height = 3.min(area.height);
                let popup = Rect::new(
                    area.x + area.width.saturating_sub(width) / 2,
                    area.y + area.height.saturating_sub(height) / 2,
                    width,
                    height,
                );
                Clear.render(popup, buf);
                Paragraph::new(Line::styled(LOADING_TEXT, self.style.loading).centered())
                    .block(Block::default().borders(Borders::ALL).border_style(self.style.loading))
                    .render(popup, buf);
            }
        }
    }
}

impl Widget for HostView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut effect_applied = false;
        for child in self.host.children() {
            match child {
                HostChild::Screen { view, .. } => {
                    self.render_screen(&view.borrow(), area, buf);
                }
                HostChild::Overlay(overlay) => {
                    if !effect_applied {
                        apply_effect(self.host.effect(), area, buf);
                        effect_applied = true;
                    }
                    self.render_overlay(overlay, area, buf);
                }
            }
        }
        if !effect_applied {
            apply_effect(self.host.effect(), area, buf);
        }
    }
}

/// Terminal stand-in for a blur: everything drawn so far is dimmed.
fn apply_effect(effect: Option<HostEffect>, area: Rect, buf: &mut Buffer) {
    if let Some(HostEffect::Blur { .. }) = effect {
        buf.set_style(area, Style::default().add_modifier(Modifier::DIM));
    }
}

/// Shifts `area` by whole cells and clips it to the original bounds.
fn translated(area: Rect, dx: f32, dy: f32) -> Rect {
    #[allow(clippy::cast_possible_truncation)]
    let (dx, dy) = (dx.round() as i32, dy.round() as i32);
    let x = i32::from(area.x) + dx;
    let y = i32::from(area.y) + dy;
    let left = x.max(i32::from(area.x));
    let top = y.max(i32::from(area.y));
    let right = (x + i32::from(area.width)).min(i32::from(area.right()));
    let bottom = (y + i32::from(area.height)).min(i32::from(area.bottom()));
    if right <= left || bottom <= top {
        return Rect::new(area.x, area.y, 0, 0);
    }
    Rect::new(
        u16::try_from(left).unwrap_or(area.x),
        u16::try_from(top).unwrap_or(area.y),
        u16::try_from(right - left).unwrap_or(0),
        u16::try_from(bottom - top).unwrap_or(0),
    )
}
