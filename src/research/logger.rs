use colored::{ColoredString, Colorize};

use crate::{
    common::utils::hamming_loss,
    Booster,
    Classifier,
    TextIndex,
    WeakLearner,
    Result,
};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

const DEFAULT_ROUND: usize = 100;
const DEFAULT_TIMELIMIT_MILLIS: u128 = u128::MAX;
const WIDTH: usize = 8;
const PREC_WIDTH: usize = 5;
const FULL_WIDTH: usize = 60;
const HEADER: &str = "Round,TrainLoss,TestLoss,Time\n";


/// A booster that exposes the ensemble built so far.
pub trait CurrentHypothesis {
    /// The type of the ensemble.
    type Output;

    /// Returns the ensemble of the rounds run so far.
    fn current_hypothesis(&self) -> Self::Output;
}


/// Struct `Logger` runs a booster and logs,
/// for each round, the Hamming loss on the training and test indices
/// and the cumulative running time.
///
/// # Example
/// ```no_run
/// use textboost::prelude::*;
/// use textboost::research::Logger;
///
/// let train: SparseIndex = read_my_corpus("train");
/// let test: SparseIndex = read_my_corpus("test");
/// let disc = EqualWidth::new(8).discretize(&train).unwrap();
///
/// let booster = AdaBoostMH::init(&train, disc).rounds(500);
/// let mut logger = Logger::new(booster, PivotSearch::new(), &train, &test)
///     .print_every(10)
///     .time_limit_as_secs(60);
/// let f = logger.run("mpboost.csv").unwrap();
/// # fn read_my_corpus(_: &str) -> SparseIndex { unimplemented!() }
/// ```
pub struct Logger<'a, B, W, I> {
    booster: B,
    weak_learner: W,
    train: &'a I,
    test: &'a I,
    time_limit: u128,
    round: usize,
}


impl<'a, B, W, I> Logger<'a, B, W, I> {
    /// Create a new instance of `Logger`.
    pub fn new(
        booster: B,
        weak_learner: W,
        train: &'a I,
        test: &'a I,
    ) -> Self
    {
        Self {
            booster,
            weak_learner,
            train,
            test,
            time_limit: DEFAULT_TIMELIMIT_MILLIS,
            round: DEFAULT_ROUND,
        }
    }


    /// Set the time limit for boosting algorithm as milliseconds.
    /// If the boosting algorithm reaches this limit,
    /// breaks immediately.
    #[inline(always)]
    pub fn time_limit_as_millis(mut self, time_limit: u128) -> Self {
        self.time_limit = time_limit;
        self
    }


    /// Set the time limit for boosting algorithm as seconds.
    /// If the boosting algorithm reaches this limit,
    /// breaks immediately.
    #[inline(always)]
    pub fn time_limit_as_secs(mut self, time_limit: u64) -> Self {
        self.time_limit = (time_limit as u128).saturating_mul(1_000_u128);
        self
    }


    /// Set the interval to print the current status.
    /// By default, the method `run` prints its status every `100` rounds.
    /// If you don't want to print the log,
    /// set `usize::MAX`.
    #[inline(always)]
    pub fn print_every(mut self, round: usize) -> Self {
        assert!(round > 0, "the print interval must be positive");
        self.round = round;
        self
    }
}


impl<B, W, I, O> Logger<'_, B, W, I>
    where B: Booster<Output = O> + CurrentHypothesis<Output = O>,
          O: Classifier,
          W: WeakLearner,
          I: TextIndex,
{
    /// Returns the settings banner: booster, weak learner,
    /// their parameters, and the time limit.
    fn banner(&self) -> String {
        let mut rows = vec![(0, "Booster", self.booster.name().to_string())];
        rows.extend(
            self.booster.info().into_iter().flatten().map(|(k, v)| (1, k, v))
        );
        rows.push((0, "Weak learner", self.weak_learner.name().to_string()));
        rows.extend(
            self.weak_learner.info().into_iter().flatten().map(|(k, v)| (1, k, v))
        );
        let limit = match self.time_limit {
            u128::MAX => "none".to_string(),
            millis => elapsed(millis),
        };
        rows.push((0, "Time limit", limit));

        let rule = "-".repeat(FULL_WIDTH);
        let mut banner = format!("{rule}\n{:^FULL_WIDTH$}\n{rule}\n", "SETTINGS");
        for (depth, key, val) in rows {
            let indent = "  ".repeat(depth + 1);
            let width = FULL_WIDTH.saturating_sub(indent.len() + key.len() + 1);
            let val = if depth == 0 { val.green() } else { val.yellow() };
            banner += &format!("{indent}{} {val:>width$}\n", key.bold());
        }
        banner + &rule
    }


    fn print_row(&self, tag: ColoredString, iter: usize, train: f64, test: f64, time: u128) {
        println!(
            "{tag} {:>WIDTH$}  {:>WIDTH$}  {:>WIDTH$}  {:>WIDTH$}",
            iter.to_string().red(),
            format!("{train:.PREC_WIDTH$}").green(),
            format!("{test:.PREC_WIDTH$}").yellow(),
            elapsed(time).cyan(),
        );
    }


    /// Run the given boosting algorithm with logging.
    /// Note that this method is almost the same as `Booster::run`.
    /// This method measures running time per iteration
    /// and writes one CSV line per round to `filename`.
    pub fn run<P: AsRef<Path>>(&mut self, filename: P) -> Result<O> {
        let mut file = BufWriter::new(File::create(filename)?);
        file.write_all(HEADER.as_bytes())?;

        self.booster.preprocess();
        println!("{}", self.banner());

        // Cumulative time
        let mut time_acc = 0;

        let verbose = self.round != usize::MAX;
        if verbose {
            println!(
                "      {:>WIDTH$}  {:>WIDTH$}  {:>WIDTH$}  {:>WIDTH$}",
                "ROUND".bold(), "TRAIN".bold(), "TEST".bold(), "TIME".bold(),
            );
        }
        for iter in 1.. {
            let now = Instant::now();
            let flow = self.booster.boost(&self.weak_learner, iter)?;
            time_acc += now.elapsed().as_millis();

            if flow.is_break() {
                if verbose {
                    let f = self.booster.current_hypothesis();
                    let train = hamming_loss(&f, self.train);
                    let test = hamming_loss(&f, self.test);
                    let tag = "[FIN]".bold().bright_green();
                    self.print_row(tag, iter - 1, train, test, time_acc);
                    println!();
                }
                break;
            }

            let f = self.booster.current_hypothesis();
            let train = hamming_loss(&f, self.train);
            let test = hamming_loss(&f, self.test);

            let line = format!("{iter},{train},{test},{time_acc}\n");
            file.write_all(line.as_bytes())?;

            if time_acc > self.time_limit {
                let tag = "[TLE]".bold().bright_red();
                self.print_row(tag, iter, train, test, time_acc);
                break;
            }

            if verbose && iter % self.round == 0 {
                let tag = "[LOG]".bold().magenta();
                self.print_row(tag, iter, train, test, time_acc);
            }
        }
        file.flush()?;

        Ok(self.booster.postprocess())
    }
}


/// Formats a duration given in milliseconds,
/// e.g. `0.042s`, `12.500s`, `3m07s`, `2h05m`.
fn elapsed(millis: u128) -> String {
    let secs = millis / 1_000;
    match secs {
        0..=59 => format!("{secs}.{:03}s", millis % 1_000),
        60..=3_599 => format!("{}m{:02}s", secs / 60, secs % 60),
        _ => format!("{}h{:02}m", secs / 3_600, secs % 3_600 / 60),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AdaBoostMH, Bins, Discretization, PivotSearch, SparseIndexBuilder};

    #[test]
    fn test_banner_lists_settings() {
        let index = SparseIndexBuilder::new(1, 1)
            .document(&[(0, 0.5)], &[0])
            .build();
        let disc = Discretization::new(
            vec![Bins::from_boundaries(&[0.0, 1.0])]
        ).unwrap();
        let booster = AdaBoostMH::init(&index, disc).rounds(3);
        let logger = Logger::new(booster, PivotSearch::new(), &index, &index)
            .time_limit_as_secs(90);

        let banner = logger.banner();
        for expect in ["AdaBoost.MH", "Max iteration", "Pivot search", "1m30s"] {
            assert!(banner.contains(expect), "expected {expect} in\n{banner}");
        }
    }

    #[test]
    fn test_elapsed() {
        assert_eq!(elapsed(42), "0.042s");
        assert_eq!(elapsed(12_500), "12.500s");
        assert_eq!(elapsed(187_000), "3m07s");
        assert_eq!(elapsed(7_500_000), "2h05m");
    }
}
