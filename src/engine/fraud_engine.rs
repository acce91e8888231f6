use crate::config::{ConfigError, RuleConfig};
use crate::engine::errors::EngineError;
use crate::engine::merger::merge_triggers;
use crate::models::{FraudReport, RawTransaction, RecordError, RejectedRecord, RuleTrigger, Transaction};
use crate::rules::{catalogue, Rule, RuleContext};
use crate::storage::{CreditLimitStore, MerchantRegistry, SnapshotStore};
use anyhow::Context;
use csv::{ReaderBuilder, Trim};
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, info, warn};

/// Result of evaluating one batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvaluationOutcome {
    /// Flagged transactions in input order.
    pub reports: Vec<FraudReport>,
    /// Records kept out of evaluation, in input order.
    pub rejected: Vec<RejectedRecord>
}

/// Rule evaluation engine: validates a batch, snapshots the reference stores, runs the
/// rule catalogue and merges the triggers into reports.
pub struct FraudEngine {
    config: Arc<RuleConfig>,
    merchants: Arc<MerchantRegistry>,
    credit_limits: Arc<CreditLimitStore>,
    rules: Vec<Arc<dyn Rule>>,
    backpressure: usize
}

impl FraudEngine {
    /// Creates an engine over shared reference stores.
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration does not validate; no batch can be
    /// evaluated with an invalid configuration.
    pub fn new(config: RuleConfig, merchants: Arc<MerchantRegistry>, credit_limits: Arc<CreditLimitStore>) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config: Arc::new(config),
            merchants,
            credit_limits,
            rules: catalogue(),
            backpressure: 256
        })
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Evaluates a batch on the calling thread, one rule after another.
    pub fn evaluate(&self, transactions: &[Transaction]) -> Result<EvaluationOutcome, EngineError> {
        let (context, rejected) = self.prepare(transactions.iter().cloned().map(Ok))?;

        let triggers: Vec<RuleTrigger> = self.rules.iter()
            .flat_map(|rule| evaluate_rule(rule.as_ref(), &context))
            .collect();

        Ok(finish(&context, triggers, rejected))
    }

    /// Evaluates a batch of parsed records with every rule on its own blocking task.
    ///
    /// Records that failed to parse are reported as rejected alongside those failing
    /// validation. Triggers are merged in catalogue order, so the outcome is the same as
    /// `evaluate` would produce for the valid records.
    pub async fn evaluate_records(&self, records: Vec<Result<Transaction, RecordError>>) -> Result<EvaluationOutcome, EngineError> {
        let (context, rejected) = self.prepare(records)?;

        let tasks: Vec<JoinHandle<Vec<RuleTrigger>>> = self.rules.iter()
            .map(|rule| {
                let rule = rule.clone();
                let context = context.clone();
                spawn_blocking(move || evaluate_rule(rule.as_ref(), &context))
            })
            .collect();

        let mut triggers = Vec::new();

        for task in tasks {
            triggers.extend(task.await?);
        }

        Ok(finish(&context, triggers, rejected))
    }

    /// Reads a CSV batch from `path` and evaluates it.
    ///
    /// Reading stops as soon as the file holds more records than `max_batch_size`, so an
    /// oversized file is refused without being buffered whole.
    pub async fn run(&self, path: &str) -> anyhow::Result<EvaluationOutcome> {
        let (sender, mut receiver) = mpsc::channel::<Result<Transaction, RecordError>>(self.backpressure);
        let csv_handle = spawn_csv_reader(path.to_string(), sender);
        let mut records = Vec::new();

        while let Some(record) = receiver.recv().await {
            records.push(record);

            if records.len() > self.config.max_batch_size {
                //NOTE: Closing the channel makes the reader's next send fail, which ends its loop.
                drop(receiver);
                csv_handle.await??;

                return Err(EngineError::BatchTooLarge {
                    size: records.len(),
                    limit: self.config.max_batch_size
                }.into());
            }
        }

        csv_handle.await??;

        Ok(self.evaluate_records(records).await?)
    }

    /// Splits the input into the batch the rules see and the rejected records, then takes
    /// one snapshot of each reference store for the whole evaluation.
    fn prepare<I>(&self, records: I) -> Result<(RuleContext, Vec<RejectedRecord>), EngineError>
    where
        I: IntoIterator<Item = Result<Transaction, RecordError>>
    {
        let records: Vec<_> = records.into_iter().collect();

        if records.len() > self.config.max_batch_size {
            return Err(EngineError::BatchTooLarge {
                size: records.len(),
                limit: self.config.max_batch_size
            });
        }

        let mut seen = HashSet::with_capacity(records.len());
        let mut batch = Vec::with_capacity(records.len());
        let mut rejected = Vec::new();

        for (position, record) in records.into_iter().enumerate() {
            let checked = record.and_then(|transaction| {
                transaction.validate()?;

                if !seen.insert(transaction.transaction_id.clone()) {
                    return Err(RecordError::duplicate_transaction(&transaction.transaction_id));
                }

                Ok(transaction)
            });

            match checked {
                Ok(transaction) => batch.push(transaction),
                Err(error) => {
                    warn!("Record [{position}] rejected: {error}");
                    rejected.push(RejectedRecord { position, error });
                }
            }
        }

        let context = RuleContext {
            batch: batch.into(),
            merchants: self.merchants.snapshot(),
            credit_limits: self.credit_limits.snapshot(),
            config: self.config.clone()
        };

        Ok((context, rejected))
    }
}

fn evaluate_rule(rule: &dyn Rule, context: &RuleContext) -> Vec<RuleTrigger> {
    let triggers = rule.evaluate(context);
    debug!("Rule [{}] fired for {} transactions", rule.name(), triggers.len());
    triggers
}

fn finish(context: &RuleContext, triggers: Vec<RuleTrigger>, rejected: Vec<RejectedRecord>) -> EvaluationOutcome {
    let reports = merge_triggers(&context.batch, triggers);
    info!("Evaluated {} transactions: {} flagged, {} rejected", context.batch.len(), reports.len(), rejected.len());

    EvaluationOutcome { reports, rejected }
}

fn spawn_csv_reader(path: String, sender: mpsc::Sender<Result<Transaction, RecordError>>) -> JoinHandle<anyhow::Result<()>> {
    spawn_blocking(move || {
        let file = File::open(&path).with_context(|| format!("Error opening CSV at path: {path}"))?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(BufReader::new(file));

        for result in reader.deserialize::<RawTransaction>() {
            let record = result
                .map_err(|error| RecordError::Unreadable(error.to_string()))
                .and_then(Transaction::try_from);

            if sender.blocking_send(record).is_err() {
                break;
            }
        }

        Ok(())
    })
}
