use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Text;
use ratatui::widgets::{Block, Borders, Cell, Padding, Row, Table, Widget};

use github_lens_core::UserReport;

const HEADERS: [&str; 6] = ["User", "Repositories", "Followers", "Programming languages", "Forks", "Activity"];
// one blank, the divider, one blank
const COLUMN_SPACING: u16 = 3;

fn report_cells(r: &UserReport) -> [String; 6] {
    [
        r.login.clone(),
        r.public_repos.to_string(),
        r.followers.to_string(),
        r.languages.clone(),
        r.forks.to_string(),
        r.activity.clone(),
    ]
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Draws the reports as a bordered table into an off-screen buffer and
/// returns it as plain text lines, so it works without a terminal.
pub fn render_reports(reports: &[UserReport]) -> String {
    let rows: Vec<[String; 6]> = reports.iter().map(report_cells).collect();

    let mut widths: Vec<u16> = HEADERS.iter().map(|h| clamp_u16(Text::from(*h).width())).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(clamp_u16(Text::from(cell.as_str()).width()));
        }
    }
    let heights: Vec<u16> = rows
        .iter()
        .map(|r| r.iter().map(|c| Text::from(c.as_str()).height().max(1)).max().unwrap_or(1))
        .map(clamp_u16)
        .collect();

    let gaps = rows.len().saturating_sub(1);
    let header_rule = u16::from(!rows.is_empty());
    // borders and inner padding on both sides
    let width = widths
        .iter()
        .fold(4 + COLUMN_SPACING * (HEADERS.len() as u16 - 1), |acc, w| acc.saturating_add(*w));
    // borders + header + header rule + rows + one rule between rows
    let height = heights
        .iter()
        .fold((3 + header_rule).saturating_add(clamp_u16(gaps)), |acc, h| acc.saturating_add(*h));

    let body = rows.iter().zip(&heights).enumerate().map(|(i, (cells, &h))| {
        let row = Row::new(cells.iter().map(|c| Cell::from(Text::from(c.as_str())))).height(h);
        if i < gaps { row.bottom_margin(1) } else { row }
    });
    let table = Table::new(body, widths.iter().map(|&w| Constraint::Length(w)))
        .header(Row::new(HEADERS).bottom_margin(header_rule))
        .column_spacing(COLUMN_SPACING)
        .block(Block::default().borders(Borders::ALL).padding(Padding::horizontal(1)));

    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    Widget::render(table, area, &mut buf);

    let mut rules = Vec::with_capacity(rows.len());
    if header_rule == 1 {
        let mut y = 2u16;
        rules.push(y);
        for &h in heights.iter().take(gaps) {
            y = y.saturating_add(1).saturating_add(h);
            rules.push(y);
        }
    }
    draw_grid(&mut buf, &column_dividers(&widths), &rules);
    buffer_to_string(&buf)
}

/// x of the divider centred in each gap between two columns
fn column_dividers(widths: &[u16]) -> Vec<u16> {
    let mut xs = Vec::with_capacity(widths.len().saturating_sub(1));
    let mut x = 2u16;
    for &w in widths.iter().take(widths.len().saturating_sub(1)) {
        x = x.saturating_add(w);
        xs.push(x.saturating_add(COLUMN_SPACING / 2));
        x = x.saturating_add(COLUMN_SPACING);
    }
    xs
}

fn set_symbol(buf: &mut Buffer, x: u16, y: u16, symbol: &str) {
    let area = buf.area;
    if x < area.width && y < area.height {
        let i = buf.index_of(x, y);
        buf.content[i].set_symbol(symbol);
    }
}

/// Horizontal rules on the `rules` lines and vertical dividers at `dividers`,
/// joined to the outer border with light box-drawing junctions.
fn draw_grid(buf: &mut Buffer, dividers: &[u16], rules: &[u16]) {
    let (width, height) = (buf.area.width, buf.area.height);
    if width < 2 || height < 2 {
        return;
    }
    for &y in rules {
        set_symbol(buf, 0, y, "├");
        for x in 1..width - 1 {
            set_symbol(buf, x, y, "─");
        }
        set_symbol(buf, width - 1, y, "┤");
    }
    for &x in dividers {
        set_symbol(buf, x, 0, "┬");
        for y in 1..height - 1 {
            let symbol = if rules.contains(&y) { "┼" } else { "│" };
            set_symbol(buf, x, y, symbol);
        }
        set_symbol(buf, x, height - 1, "┴");
    }
}

fn buffer_to_string(buf: &Buffer) -> String {
    let width = usize::from(buf.area.width).max(1);
    let mut out = String::new();
    for line in buf.content.chunks(width) {
        let text: String = line.iter().map(|c| c.symbol()).collect();
        out.push_str(text.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(login: &str, languages: &str, activity: &str) -> UserReport {
        UserReport {
            login: login.into(),
            public_repos: 12,
            followers: 7,
            languages: languages.into(),
            forks: 3,
            activity: activity.into(),
        }
    }

    #[test]
    fn header_only_when_empty() {
        let out = render_reports(&[]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('┌') && lines[0].ends_with('┐'));
        assert!(lines[0].contains('┬'));
        assert!(lines[1].starts_with("│ User │ Repositories │"));
        assert!(lines[1].ends_with("│ Activity │"));
        assert!(lines[2].starts_with('└') && lines[2].contains('┴'));
    }

    #[test]
    fn multi_line_cells_get_their_own_lines() {
        let r = report("octocat", "Go:80.00\nPython:20.00", "2021:100.00%");
        let out = render_reports(&[r]);
        let lines: Vec<&str> = out.lines().collect();
        // top border, header, header rule, two content lines, bottom border
        assert_eq!(lines.len(), 6);
        assert!(lines[3].contains("octocat") && lines[3].contains("Go:80.00") && lines[3].contains("2021:100.00%"));
        assert!(lines[4].contains("Python:20.00"));
        assert!(!lines[4].contains("octocat"));
        assert!(lines[4].starts_with("│         │"));
    }

    #[test]
    fn header_rule_joins_dividers() {
        let out = render_reports(&[report("octocat", "Go:100.00", "2021:100.00%")]);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[2].starts_with("├─") && lines[2].ends_with("─┤"));
        assert_eq!(lines[2].matches('┼').count(), HEADERS.len() - 1);
        assert_eq!(lines[0].matches('┬').count(), HEADERS.len() - 1);
        assert_eq!(lines[3].matches('│').count(), HEADERS.len() + 1);
        assert!(lines[3].starts_with("│ octocat │ 12"));
    }

    #[test]
    fn rows_are_separated() {
        let out = render_reports(&[report("a", "Go:100.00", ""), report("b", "C:100.00", "")]);
        let lines: Vec<&str> = out.lines().collect();
        // top, header, header rule, row a, rule, row b, bottom
        assert_eq!(lines.len(), 7);
        assert!(lines[3].contains("Go:100.00"));
        assert!(lines[4].starts_with('├') && lines[4].contains('┼'));
        assert!(lines[5].contains("C:100.00"));
    }

    #[test]
    fn dividers_sit_between_columns() {
        assert_eq!(column_dividers(&[4, 12]), vec![7]);
        assert!(column_dividers(&[5]).is_empty());
    }
}
