//! Recording stub engine shared by the integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use pfcosim_adapter::{CommandHandle, CommandKind, EngineResult, SolverEngine};
use pfcosim_core::{AttributeValue, CaseTime};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

pub const LDF_NAME: &str = "Load Flow Calculation";

/// One engine call as seen by the stub.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ActivateProject(String),
    ActivateStudyCase(String),
    Resolve(CommandKind),
    SetAttribute { name: String, value: AttributeValue },
    SetCaseTime(CaseTime),
    Execute,
}

/// Shared view of the calls made on a [`RecordingEngine`].
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn case_times(&self) -> Vec<CaseTime> {
        self.0
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::SetCaseTime(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    pub fn executions(&self) -> usize {
        self.count(|call| matches!(call, Call::Execute))
    }

    pub fn resolutions(&self) -> usize {
        self.count(|call| matches!(call, Call::Resolve(_)))
    }

    pub fn attribute_sets(&self) -> Vec<(String, AttributeValue)> {
        self.0
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::SetAttribute { name, value } => Some((name.clone(), value.clone())),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().iter().filter(|call| pred(call)).count()
    }

    fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }
}

/// Stub engine that records every call and fails on demand.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    log: CallLog,
    executions: usize,
    /// Raw result code for the n-th execution (1-based); others return 0.
    pub fail_on_execution: HashMap<usize, i32>,
    pub missing_command: bool,
    pub reject_option: Option<String>,
    pub fail_case_time: bool,
    pub fail_project: bool,
}

impl RecordingEngine {
    pub fn new() -> (Self, CallLog) {
        let engine = Self::default();
        let log = engine.log.clone();
        (engine, log)
    }

    pub fn failing_on(execution: usize, code: i32) -> (Self, CallLog) {
        let (mut engine, log) = Self::new();
        engine.fail_on_execution.insert(execution, code);
        (engine, log)
    }
}

impl SolverEngine for RecordingEngine {
    fn activate_project(&mut self, project: &str) -> EngineResult<()> {
        self.log.push(Call::ActivateProject(project.to_string()));
        if self.fail_project {
            return Err(format!("project '{}' not found", project).into());
        }
        Ok(())
    }

    fn activate_study_case(&mut self, study_case: &str) -> EngineResult<()> {
        self.log.push(Call::ActivateStudyCase(study_case.to_string()));
        Ok(())
    }

    fn resolve_command(&mut self, kind: CommandKind) -> EngineResult<Option<CommandHandle>> {
        self.log.push(Call::Resolve(kind));
        if self.missing_command {
            return Ok(None);
        }
        Ok(Some(CommandHandle::new(7)))
    }

    fn set_attribute(
        &mut self,
        _command: CommandHandle,
        name: &str,
        value: &AttributeValue,
    ) -> EngineResult<()> {
        self.log.push(Call::SetAttribute {
            name: name.to_string(),
            value: value.clone(),
        });
        if self.reject_option.as_deref() == Some(name) {
            return Err(format!("unknown attribute {}", name).into());
        }
        Ok(())
    }

    fn set_case_time(&mut self, time: CaseTime) -> EngineResult<()> {
        self.log.push(Call::SetCaseTime(time));
        if self.fail_case_time {
            return Err("study case is read-only".into());
        }
        Ok(())
    }

    fn execute(&mut self, _command: CommandHandle) -> EngineResult<i32> {
        self.log.push(Call::Execute);
        self.executions += 1;
        Ok(self
            .fail_on_execution
            .get(&self.executions)
            .copied()
            .unwrap_or(0))
    }

    fn command_name(&self, _command: CommandHandle) -> String {
        LDF_NAME.to_string()
    }
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// One event captured by [`TraceLog`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    /// Name of the span the event was emitted in.
    pub span: Option<&'static str>,
    pub message: String,
}

/// Tracing layer that keeps events and span field values in memory.
#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    events: Arc<Mutex<Vec<RecordedEvent>>>,
    span_fields: Arc<Mutex<Vec<(&'static str, String, String)>>>,
}

impl TraceLog {
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Values recorded for `field` on spans named `span`.
    pub fn span_field(&self, span: &str, field: &str) -> Vec<String> {
        self.span_fields
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, key, _)| *name == span && key == field)
            .map(|(_, _, value)| value.clone())
            .collect()
    }

    fn store_span_fields<S>(&self, id: &Id, ctx: &Context<'_, S>, fields: FieldCollector)
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        let Some(span) = ctx.span(id) else { return };
        let mut stored = self.span_fields.lock().unwrap();
        for (key, value) in fields.0 {
            stored.push((span.name(), key, value));
        }
    }
}

#[derive(Default)]
struct FieldCollector(Vec<(String, String)>);

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{:?}", value)));
    }
}

impl<S> Layer<S> for TraceLog
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut fields = FieldCollector::default();
        attrs.record(&mut fields);
        self.store_span_fields(id, &ctx, fields);
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let mut fields = FieldCollector::default();
        values.record(&mut fields);
        self.store_span_fields(id, &ctx, fields);
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut fields = FieldCollector::default();
        event.record(&mut fields);
        let message = fields
            .0
            .into_iter()
            .find(|(key, _)| key == "message")
            .map(|(_, value)| value)
            .unwrap_or_default();
        self.events.lock().unwrap().push(RecordedEvent {
            span: ctx.event_span(event).map(|span| span.name()),
            message,
        });
    }
}
