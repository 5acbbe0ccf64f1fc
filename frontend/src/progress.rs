use gloo_net::http::Method;

use crate::api::solve_path;
use crate::models::{Difficulty, Problem};

/// `round(done / total * 100)`, 0 for an empty list.
pub fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((done as f64 / total as f64) * 100.0).round() as u8
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub solved: usize,
    pub total: usize,
}

impl Tally {
    pub fn percent(&self) -> u8 {
        percent(self.solved, self.total)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProblemStats {
    pub overall: Tally,
    pub by_difficulty: Vec<(Difficulty, Tally)>,
}

impl ProblemStats {
    pub fn of(problems: &[Problem]) -> Self {
        let tally = |keep: &dyn Fn(&Problem) -> bool| {
            let matching = problems.iter().filter(|p| keep(*p));
            let (solved, total) = matching.fold((0, 0), |(s, t), p| (s + usize::from(p.is_solved), t + 1));
            Tally { solved, total }
        };

        Self {
            overall: tally(&|_: &Problem| true),
            by_difficulty: Difficulty::ALL
                .into_iter()
                .map(|d| (d, tally(&|p: &Problem| p.difficulty == d)))
                .collect(),
        }
    }
}

/// What clicking a problem's checkbox asks the server to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveAction {
    Mark,
    Unmark,
}

impl SolveAction {
    pub fn for_problem(problem: &Problem) -> Self {
        if problem.is_solved {
            SolveAction::Unmark
        } else {
            SolveAction::Mark
        }
    }

    pub fn method(self) -> Method {
        match self {
            SolveAction::Mark => Method::POST,
            SolveAction::Unmark => Method::DELETE,
        }
    }

    pub fn path(self, problem_id: i64) -> String {
        solve_path(problem_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(id: i64, difficulty: Difficulty, solved: bool) -> Problem {
        Problem {
            id,
            title: format!("p{id}"),
            difficulty,
            leetcode_link: None,
            is_solved: solved,
            topic_id: 1,
        }
    }

    /// Server side of the solve endpoints, as far as the client can observe.
    fn apply(list: &mut [Problem], id: i64, action: SolveAction) {
        if let Some(p) = list.iter_mut().find(|p| p.id == id) {
            p.is_solved = action == SolveAction::Mark;
        }
    }

    #[test]
    fn percent_rounds_and_handles_empty() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(5, 5), 100);
    }

    #[test]
    fn percent_matches_formula_for_all_small_ratios() {
        for total in 1..=40usize {
            for done in 0..=total {
                let expected = (100.0 * done as f64 / total as f64).round() as u8;
                assert_eq!(percent(done, total), expected, "{done}/{total}");
            }
        }
    }

    #[test]
    fn stats_break_down_by_difficulty() {
        let list = vec![
            problem(1, Difficulty::Easy, true),
            problem(2, Difficulty::Easy, false),
            problem(3, Difficulty::Medium, true),
            problem(4, Difficulty::Hard, false),
        ];
        let stats = ProblemStats::of(&list);
        assert_eq!(stats.overall, Tally { solved: 2, total: 4 });
        assert_eq!(stats.overall.percent(), 50);
        assert_eq!(stats.by_difficulty[0], (Difficulty::Easy, Tally { solved: 1, total: 2 }));
        assert_eq!(stats.by_difficulty[1].1.percent(), 100);
        assert_eq!(stats.by_difficulty[2].1.percent(), 0);
    }

    #[test]
    fn empty_topic_has_zero_progress_everywhere() {
        let stats = ProblemStats::of(&[]);
        assert_eq!(stats.overall.percent(), 0);
        assert!(stats.by_difficulty.iter().all(|(_, t)| t.total == 0 && t.percent() == 0));
    }

    #[test]
    fn toggle_picks_endpoint_from_current_state() {
        let open = problem(7, Difficulty::Easy, false);
        assert_eq!(SolveAction::for_problem(&open), SolveAction::Mark);
        assert_eq!(SolveAction::Mark.method(), Method::POST);

        let done = problem(7, Difficulty::Easy, true);
        assert_eq!(SolveAction::for_problem(&done), SolveAction::Unmark);
        assert_eq!(SolveAction::Unmark.method(), Method::DELETE);
        assert_eq!(SolveAction::Unmark.path(7), "/api/topics/problem/7/solve");
    }

    #[test]
    fn toggling_twice_restores_state_and_count() {
        let mut list = vec![problem(1, Difficulty::Easy, false), problem(2, Difficulty::Hard, true)];
        let before = list.clone();

        for _ in 0..2 {
            let action = SolveAction::for_problem(&list[0]);
            apply(&mut list, 1, action);
        }
        assert_eq!(list, before);
        assert_eq!(ProblemStats::of(&list).overall.total, 2);

        let action = SolveAction::for_problem(&list[1]);
        apply(&mut list, 2, action);
        assert!(!list[1].is_solved);
        assert_eq!(ProblemStats::of(&list).overall.total, 2);
    }
}
