use engine::session::SessionStatus;

/// Result of one headless play-through.
pub struct RunOutcome {
    pub status: SessionStatus,
    pub score: u32,
    pub stars: Option<u8>,
    pub moves_used: u32,
    pub shuffles: u32,
    pub clicks: u32,
}

/// Aggregate over a batch of runs, printed at the end as the balancing
/// report.
#[derive(Default)]
pub struct Summary {
    runs: u32,
    wins: u32,
    out_of_moves: u32,
    stuck: u32,
    aborted: u32,
    star_counts: [u32; 3],
    total_score: u64,
    total_moves_used: u64,
    total_shuffles: u64,
    total_clicks: u64,
}

impl Summary {
    pub fn record(&mut self, outcome: &RunOutcome) {
        self.runs += 1;
        match outcome.status {
            SessionStatus::Won => self.wins += 1,
            SessionStatus::OutOfMoves => self.out_of_moves += 1,
            SessionStatus::Stuck => self.stuck += 1,
            SessionStatus::Idle => self.aborted += 1,
        }
        if let Some(stars) = outcome.stars {
            self.star_counts[(stars as usize - 1).min(2)] += 1;
        }
        self.total_score += u64::from(outcome.score);
        self.total_moves_used += u64::from(outcome.moves_used);
        self.total_shuffles += u64::from(outcome.shuffles);
        self.total_clicks += u64::from(outcome.clicks);
    }

    pub fn lines(&self) -> Vec<String> {
        if self.runs == 0 {
            return vec!["No runs recorded".to_string()];
        }
        let runs = f64::from(self.runs);
        vec![
            format!(
                "Outcomes: {} won, {} out of moves, {} stuck, {} aborted ({:.1}% win rate)",
                self.wins,
                self.out_of_moves,
                self.stuck,
                self.aborted,
                f64::from(self.wins) * 100.0 / runs
            ),
            format!(
                "Stars: {} one, {} two, {} three",
                self.star_counts[0], self.star_counts[1], self.star_counts[2]
            ),
            format!(
                "Averages: {:.0} score, {:.1} moves used, {:.1} clicks, {:.2} shuffles per run",
                self.total_score as f64 / runs,
                self.total_moves_used as f64 / runs,
                self.total_clicks as f64 / runs,
                self.total_shuffles as f64 / runs
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(status: SessionStatus, score: u32, stars: Option<u8>) -> RunOutcome {
        RunOutcome {
            status,
            score,
            stars,
            moves_used: 10,
            shuffles: 1,
            clicks: 12,
        }
    }

    #[test]
    fn test_summary_counts_outcomes() {
        let mut summary = Summary::default();
        summary.record(&outcome(SessionStatus::Won, 300, Some(3)));
        summary.record(&outcome(SessionStatus::Won, 200, Some(1)));
        summary.record(&outcome(SessionStatus::OutOfMoves, 100, None));
        summary.record(&outcome(SessionStatus::Stuck, 50, None));

        assert_eq!(summary.runs, 4);
        assert_eq!(summary.wins, 2);
        assert_eq!(summary.out_of_moves, 1);
        assert_eq!(summary.stuck, 1);
        assert_eq!(summary.star_counts, [1, 0, 1]);
        assert_eq!(summary.total_score, 650);
    }

    #[test]
    fn test_summary_lines_report_win_rate() {
        let mut summary = Summary::default();
        summary.record(&outcome(SessionStatus::Won, 300, Some(2)));
        summary.record(&outcome(SessionStatus::OutOfMoves, 100, None));

        let lines = summary.lines();
        assert!(lines[0].contains("50.0% win rate"));
        assert!(lines[1].contains("1 two"));
    }

    #[test]
    fn test_empty_summary_does_not_divide_by_zero() {
        assert_eq!(Summary::default().lines(), vec!["No runs recorded"]);
    }
}
