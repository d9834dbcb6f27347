use chrono::NaiveDate;
use image::{imageops, RgbImage};
use plotters::prelude::*;
use plotters::style::FontDesc;
use thiserror::Error;

use crate::config::DisplayConfig;
use crate::reports::Report;

const FONT_FAMILY: &str = "sans-serif";
const DATE_FONT_SIZE: i32 = 30;
const TITLE_FONT_SIZE: i32 = 20;
const TITLE_PADDING_PX: i32 = 15;
const BODY_LEFT_MARGIN_PX: i32 = 5;
const BODY_TOP_PADDING_PX: i32 = 5;
const BODY_RIGHT_MARGIN_PX: u32 = 5;
const BANNER_EXTRA_PX: i32 = 5;
const LINE_SPACING_PX: i32 = 2;

#[derive(Debug, Error)]
#[error("{message}")]
pub struct RenderError {
    message: String,
}

impl RenderError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Composes one page: red date banner, centered title, word-wrapped body.
/// The panel is mounted upside down, so the finished bitmap is rotated 180
/// degrees before it goes to the display sink.
pub fn render_page(
    report: &Report,
    today: NaiveDate,
    display: &DisplayConfig,
) -> Result<RgbImage, RenderError> {
    let width = display.width;
    let height = display.height;
    let date_line = today.format("%B %d, %Y").to_string();
    let mut rgb_buffer = vec![255u8; width as usize * height as usize * 3];

    {
        let drawing_area =
            BitMapBackend::with_buffer(&mut rgb_buffer, (width, height)).into_drawing_area();
        drawing_area
            .fill(&WHITE)
            .map_err(|error| RenderError::new(format!("background fill error: {:?}", error)))?;

        let date_font: FontDesc<'_> = (FONT_FAMILY, DATE_FONT_SIZE).into_font();
        let title_font: FontDesc<'_> = (FONT_FAMILY, TITLE_FONT_SIZE).into_font();
        let body_font: FontDesc<'_> = (FONT_FAMILY, report.font_size as i32).into_font();

        let (date_width, date_height) = text_size(&date_font, &date_line)?;
        let banner_height = date_height as i32 + BANNER_EXTRA_PX;
        drawing_area
            .draw(&Rectangle::new(
                [(0, 0), (width as i32, banner_height)],
                RED.filled(),
            ))
            .map_err(|error| RenderError::new(format!("banner draw error: {:?}", error)))?;
        let date_x = ((width as i32 - date_width as i32) / 2).max(0);
        drawing_area
            .draw(&Text::new(date_line, (date_x, 0), date_font.color(&WHITE)))
            .map_err(|error| RenderError::new(format!("date draw error: {:?}", error)))?;

        let (title_width, title_height) = text_size(&title_font, &report.title)?;
        let title_x = ((width as i32 - title_width as i32) / 2).max(0);
        let title_y = banner_height + TITLE_PADDING_PX;
        drawing_area
            .draw(&Text::new(
                report.title.clone(),
                (title_x, title_y),
                title_font.color(&BLACK),
            ))
            .map_err(|error| RenderError::new(format!("title draw error: {:?}", error)))?;

        let (_, line_height) = text_size(&body_font, "Ag")?;
        let max_body_width = width.saturating_sub(BODY_LEFT_MARGIN_PX as u32 + BODY_RIGHT_MARGIN_PX);
        let lines = wrap_body(&report.body, max_body_width, |text| {
            body_font.box_size(text).map(|(w, _)| w).unwrap_or(u32::MAX)
        });

        let mut line_y = title_y + title_height as i32 + BODY_TOP_PADDING_PX;
        for line in lines {
            if line_y + line_height as i32 > height as i32 {
                log::warn!("page_body_truncated title=\"{}\"", report.title);
                break;
            }
            if !line.is_empty() {
                drawing_area
                    .draw(&Text::new(
                        line,
                        (BODY_LEFT_MARGIN_PX, line_y),
                        body_font.color(&BLACK),
                    ))
                    .map_err(|error| RenderError::new(format!("body draw error: {:?}", error)))?;
            }
            line_y += line_height as i32 + LINE_SPACING_PX;
        }

        drawing_area
            .present()
            .map_err(|error| RenderError::new(format!("present error: {:?}", error)))?;
    }

    let frame = RgbImage::from_raw(width, height, rgb_buffer)
        .ok_or_else(|| RenderError::new("image buffer conversion failed"))?;
    Ok(imageops::rotate180(&frame))
}

fn text_size(font: &FontDesc<'_>, text: &str) -> Result<(u32, u32), RenderError> {
    font.box_size(text)
        .map_err(|error| RenderError::new(format!("font metrics error: {:?}", error)))
}

/// Greedy word wrap against a caller-supplied width measure. Lines that
/// already fit pass through untouched so rank-field padding survives.
fn wrap_body<F>(body: &str, max_width: u32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> u32,
{
    let mut lines = Vec::new();
    for raw_line in body.lines() {
        if measure(raw_line) <= max_width {
            lines.push(raw_line.to_string());
            continue;
        }

        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if current.is_empty() || measure(&candidate) <= max_width {
                current = candidate;
            } else {
                lines.push(current);
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::wrap_body;

    fn char_count(text: &str) -> u32 {
        text.chars().count() as u32
    }

    #[test]
    fn short_lines_pass_through_unchanged() {
        let lines = wrap_body("1  Arcs\n2  Ark Nova\n", 40, char_count);
        assert_eq!(lines, vec!["1  Arcs", "2  Ark Nova"]);
    }

    #[test]
    fn long_line_wraps_at_word_boundaries() {
        let lines = wrap_body("Twilight Imperium Fourth Edition\n", 18, char_count);
        assert_eq!(lines, vec!["Twilight Imperium", "Fourth Edition"]);
    }

    #[test]
    fn single_overlong_word_gets_its_own_line() {
        let lines = wrap_body("Supercalifragilistic yes\n", 10, char_count);
        assert_eq!(lines, vec!["Supercalifragilistic", "yes"]);
    }

    #[test]
    fn empty_body_wraps_to_no_lines() {
        assert!(wrap_body("", 40, char_count).is_empty());
    }

    #[test]
    fn blank_lines_are_preserved() {
        let lines = wrap_body("first\n\nsecond\n", 40, char_count);
        assert_eq!(lines, vec!["first", "", "second"]);
    }
}
