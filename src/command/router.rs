//! Routes chat messages through the dispatch table to the reminder service.

use super::{
    CommandInvocation, CommandKind, RouterError, find_command, keyboard,
    replies::{FAILURE_REPLY, ReplyRenderer},
};
use crate::calendar::CalendarMirror;
use crate::task::{
    domain::{OwnerId, TaskId},
    ports::TaskRepository,
    services::{AddTaskRequest, ReminderError, ReminderService},
};
use mockable::Clock;
use tracing::{debug, error};

/// Number of candidates listed by `/delete` without arguments.
const DELETE_CANDIDATE_LIMIT: usize = 10;

/// A chat reply with an optional reply keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Reply text.
    pub text: String,
    /// Keyboard rows to show with the reply, if any.
    pub keyboard: Option<Vec<Vec<String>>>,
}

impl Reply {
    const fn plain(text: String) -> Self {
        Self {
            text,
            keyboard: None,
        }
    }
}

/// Chat command router.
pub struct CommandRouter<R, M, C>
where
    R: TaskRepository,
    M: CalendarMirror,
    C: Clock + Send + Sync,
{
    service: ReminderService<R, M, C>,
    replies: ReplyRenderer,
}

impl<R, M, C> CommandRouter<R, M, C>
where
    R: TaskRepository,
    M: CalendarMirror,
    C: Clock + Send + Sync,
{
    /// Creates a router around `service`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Template`] when a reply template fails to
    /// compile.
    pub fn new(service: ReminderService<R, M, C>) -> Result<Self, RouterError> {
        let replies = ReplyRenderer::new(service.timezone())?;
        Ok(Self { service, replies })
    }

    /// Returns the wrapped service.
    #[must_use]
    pub const fn service(&self) -> &ReminderService<R, M, C> {
        &self.service
    }

    /// Handles one chat message from `owner_id`.
    ///
    /// Input problems produce a correction hint. Storage and rendering
    /// failures are logged and answered with a generic failure reply.
    pub async fn handle(&self, owner_id: OwnerId, text: &str) -> Reply {
        match self.dispatch(owner_id, text).await {
            Ok(reply) => reply,
            Err(err) => {
                error!(owner_id = %owner_id, error = %err, "command failed");
                Reply::plain(FAILURE_REPLY.to_owned())
            }
        }
    }

    async fn dispatch(&self, owner_id: OwnerId, text: &str) -> Result<Reply, RouterError> {
        let Ok(invocation) = CommandInvocation::parse(text) else {
            return Ok(Reply::plain(self.replies.not_a_command()?));
        };
        debug!(owner_id = %owner_id, command = invocation.name(), "dispatching command");

        let Some(spec) = find_command(invocation.name()) else {
            return self.dispatch_shortcut(owner_id, &invocation).await;
        };

        let args = invocation.args();
        match spec.kind {
            CommandKind::Start => Ok(Reply {
                text: self.replies.start(self.service.calendar_enabled())?,
                keyboard: Some(keyboard()),
            }),
            CommandKind::Help => Ok(Reply::plain(self.replies.help()?)),
            CommandKind::Add => self.add(owner_id, args).await,
            CommandKind::List => {
                let tasks = self.service.upcoming(owner_id).await?;
                Ok(Reply::plain(self.replies.list(&tasks)?))
            }
            CommandKind::Today => {
                let tasks = self.service.today(owner_id).await?;
                let today = self.service.now().date_naive();
                Ok(Reply::plain(self.replies.today(today, &tasks)?))
            }
            CommandKind::Delete => {
                self.delete(owner_id, args.first().map(String::as_str))
                    .await
            }
        }
    }

    /// Treats `/<id>` as `/delete <id>`, matching the delete candidate list.
    async fn dispatch_shortcut(
        &self,
        owner_id: OwnerId,
        invocation: &CommandInvocation,
    ) -> Result<Reply, RouterError> {
        let name = invocation.name();
        if name.parse::<TaskId>().is_ok() {
            return self.delete(owner_id, Some(name)).await;
        }
        Ok(Reply::plain(self.replies.unknown(name)?))
    }

    async fn add(&self, owner_id: OwnerId, args: &[String]) -> Result<Reply, RouterError> {
        let [description @ .., date_token, time_token] = args else {
            return Ok(Reply::plain(self.replies.add_usage()?));
        };
        if description.is_empty() {
            return Ok(Reply::plain(self.replies.add_usage()?));
        }

        let request = AddTaskRequest::new(owner_id, description.join(" "), date_token, time_token);
        match self.service.add_task(request).await {
            Ok(added) => Ok(Reply::plain(
                self.replies.added(&added.task, added.mirror.as_str())?,
            )),
            Err(err @ (ReminderError::InvalidFormat(_) | ReminderError::Domain(_))) => {
                Ok(Reply::plain(self.replies.format_error(&err.to_string())?))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn delete(&self, owner_id: OwnerId, arg: Option<&str>) -> Result<Reply, RouterError> {
        let Some(raw_id) = arg else {
            let tasks = self.service.upcoming(owner_id).await?;
            let candidates = tasks.get(..DELETE_CANDIDATE_LIMIT).unwrap_or(tasks.as_slice());
            return Ok(Reply::plain(self.replies.delete_candidates(candidates)?));
        };
        let Ok(task_id) = raw_id.parse::<TaskId>() else {
            return Ok(Reply::plain(self.replies.delete_bad_id()?));
        };

        let deleted = self.service.delete_task(owner_id, task_id).await?;
        let text = if deleted.removed {
            self.replies
                .deleted(deleted.task_id.value(), deleted.mirror.as_str())?
        } else {
            self.replies.delete_missing()?
        };
        Ok(Reply::plain(text))
    }
}
