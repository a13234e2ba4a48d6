use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Vertical split of the drill screen.
pub struct DrillLayout {
    pub header: Rect,
    pub prompt: Rect,
    pub inputs: Vec<Rect>,
    pub feedback: Rect,
    pub progress: Rect,
    pub footer: Rect,
}

impl DrillLayout {
    pub fn new(area: Rect, input_count: usize, footer_lines: u16) -> Self {
        let body = centered_rect(70, 100, area);
        let mut constraints = vec![
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(3),
        ];
        constraints.extend(std::iter::repeat_n(Constraint::Length(3), input_count));
        constraints.extend([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(footer_lines),
        ]);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(Rect::new(body.x, area.y, body.width, area.height));

        let n = input_count;
        Self {
            header: Rect::new(area.x, rows[0].y, area.width, rows[0].height),
            prompt: rows[2],
            inputs: rows[3..3 + n].to_vec(),
            feedback: rows[3 + n],
            progress: rows[4 + n],
            footer: Rect::new(area.x, rows[6 + n].y, area.width, rows[6 + n].height),
        }
    }
}

/// Greedily pack key hints into as few lines as fit in `width`.
pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut out: Vec<String> = Vec::new();
    let mut current = String::new();
    for hint in hints.iter().filter(|h| !h.is_empty()) {
        let candidate = if current.is_empty() {
            format!(" {hint}")
        } else {
            format!("{current}  {hint}")
        };
        if candidate.chars().count() <= width || current.is_empty() {
            current = candidate;
        } else {
            out.push(std::mem::take(&mut current));
            current = format!(" {hint}");
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_WIDTH: u16 = 40;
    const MIN_HEIGHT: u16 = 12;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_HEIGHT).min(area.height);

    Rect::new(
        area.x + area.width.saturating_sub(target_w) / 2,
        area.y + area.height.saturating_sub(target_h) / 2,
        target_w,
        target_h,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_pack_and_wrap() {
        let lines = pack_hint_lines(&["[Enter] Check", "[Ctrl+N] Skip", "[Esc] Quit"], 32);
        assert_eq!(lines, vec![" [Enter] Check  [Ctrl+N] Skip", " [Esc] Quit"]);
        assert!(pack_hint_lines(&["x"], 0).is_empty());
    }

    #[test]
    fn overlong_hint_still_gets_a_line() {
        let lines = pack_hint_lines(&["a very long hint indeed"], 5);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn centered_rect_respects_minimums_and_bounds() {
        let area = Rect::new(0, 0, 100, 40);
        let r = centered_rect(50, 50, area);
        assert_eq!((r.x, r.y, r.width, r.height), (25, 10, 50, 20));

        let small = Rect::new(0, 0, 30, 8);
        let r = centered_rect(50, 50, small);
        assert_eq!((r.width, r.height), (30, 8));
    }

    #[test]
    fn drill_layout_has_one_rect_per_input() {
        let area = Rect::new(0, 0, 100, 30);
        assert_eq!(DrillLayout::new(area, 1, 1).inputs.len(), 1);
        let two = DrillLayout::new(area, 2, 2);
        assert_eq!(two.inputs.len(), 2);
        assert!(two.inputs[1].y > two.inputs[0].y);
        assert!(two.footer.y + two.footer.height <= area.height);
    }
}
