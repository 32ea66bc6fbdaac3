//! Reply templates rendered with `minijinja`.

use super::table::COMMANDS;
use crate::task::domain::Task;
use chrono::NaiveDate;
use chrono_tz::Tz;
use minijinja::{Environment, Value, context};
use serde::Serialize;

/// Reply sent when a request fails for reasons the user cannot fix.
pub(super) const FAILURE_REPLY: &str = "❌ Произошла ошибка. Попробуйте позже.";

const DATE_FORMATS: &str = "📅 Форматы дат:\n\
• пн, вт, ср... или понедельник, вторник...\n\
• 9.12, 15.3\n\
\n\
⏰ Формат времени:\n\
• 9.00, 17.30, 14.15";

const TEMPLATES: &[(&str, &str)] = &[
    (
        "start",
        "👋 Привет! Я бот для управления задачами.\n\n\
📋 Команды:\n\
{% for command in commands if command.listed %}{{ command.usage }} - {{ command.summary }}\n{% endfor %}\n\
{{ formats }}\n\n\
Пример:\n\
/add Встреча пн 14.30\n\
/add Учеба 9.12 9.00\n\n\
📆 Календарь: {% if calendar_enabled %}синхронизация включена{% else %}синхронизация выключена{% endif %}",
    ),
    (
        "help",
        "📋 Все команды:\n\n\
{% for command in commands if command.listed %}{{ command.usage }} - {{ command.summary }}\n{% endfor %}\n\
Пример: /add Встреча пн 14.30\n\n\
{{ formats }}",
    ),
    (
        "add_usage",
        "📝 Добавление задачи\n\n\
Используйте: /add описание дата время\n\n\
Примеры:\n\
/add Встреча пн 14.30\n\
/add Учеба 9.12 9.00\n\
/add Совещание вторник 17.30",
    ),
    (
        "add_ok",
        "✅ Задача добавлена!\n\n\
📝 {{ task.description }}\n\
🕐 {{ task.date }} в {{ task.time }}\n\
🆔 {{ task.id }}\
{% if mirror == \"synced\" %}\n📆 Добавлено в календарь{% endif %}\
{% if mirror == \"failed\" %}\n⚠️ Не удалось добавить событие в календарь{% endif %}",
    ),
    ("format_error", "❌ {{ error }}"),
    (
        "list",
        "{% if tasks %}📋 Ваши задачи:\n\n\
{% for task in tasks %}#{{ task.id }} {{ task.description }}{% if task.mirrored %} 📆{% endif %}\n   🕐 {{ task.date }} {{ task.time }}\n\n{% endfor %}\
Используйте /delete номер чтобы удалить задачу\
{% else %}📭 У вас пока нет предстоящих задач.{% endif %}",
    ),
    (
        "today",
        "{% if tasks %}📅 Задачи на сегодня ({{ today }}):\n\n\
{% for task in tasks %}#{{ task.id }} {{ task.description }}\n   🕐 {{ task.time }}\n\n{% endfor %}\
{% else %}🎉 На сегодня задач нет!{% endif %}",
    ),
    (
        "delete_pick",
        "{% if tasks %}🗑 Выберите задачу для удаления:\n\n\
{% for task in tasks %}/{{ task.id }} - {{ task.description }}\n   {{ task.date }} {{ task.time }}\n\n{% endfor %}\
Используйте /delete номер или нажмите на команду выше\
{% else %}📭 Нет задач для удаления.{% endif %}",
    ),
    ("delete_bad_id", "❌ ID задачи должен быть числом!"),
    (
        "delete_ok",
        "✅ Задача {{ id }} удалена!\
{% if mirror == \"failed\" %}\n⚠️ Не удалось удалить событие из календаря{% endif %}",
    ),
    ("delete_missing", "❌ Задача не найдена!"),
    (
        "unknown",
        "🤷 Неизвестная команда /{{ name }}. Список команд: /help",
    ),
    (
        "not_a_command",
        "Отправьте команду, например /add Встреча пн 14.30. Список команд: /help",
    ),
];

/// Task fields exposed to reply templates.
#[derive(Debug, Serialize)]
struct TaskView<'a> {
    id: i64,
    description: &'a str,
    date: String,
    time: String,
    mirrored: bool,
}

/// Renders chat replies, formatting timestamps in the configured timezone.
#[derive(Debug)]
pub(super) struct ReplyRenderer {
    environment: Environment<'static>,
    timezone: Tz,
}

impl ReplyRenderer {
    pub(super) fn new(timezone: Tz) -> Result<Self, minijinja::Error> {
        let mut environment = Environment::new();
        for &(name, source) in TEMPLATES {
            environment.add_template(name, source)?;
        }
        Ok(Self {
            environment,
            timezone,
        })
    }

    fn render(&self, name: &str, ctx: Value) -> Result<String, minijinja::Error> {
        self.environment.get_template(name)?.render(ctx)
    }

    fn task_view<'a>(&self, task: &'a Task) -> TaskView<'a> {
        let local = task.due_at().with_timezone(&self.timezone);
        TaskView {
            id: task.id().value(),
            description: task.description().as_str(),
            date: local.format("%d.%m.%Y").to_string(),
            time: local.format("%H:%M").to_string(),
            mirrored: task.external_event_ref().is_some(),
        }
    }

    pub(super) fn start(&self, calendar_enabled: bool) -> Result<String, minijinja::Error> {
        self.render(
            "start",
            context! {
                commands => COMMANDS,
                formats => DATE_FORMATS,
                calendar_enabled => calendar_enabled,
            },
        )
    }

    pub(super) fn help(&self) -> Result<String, minijinja::Error> {
        self.render(
            "help",
            context! { commands => COMMANDS, formats => DATE_FORMATS },
        )
    }

    pub(super) fn add_usage(&self) -> Result<String, minijinja::Error> {
        self.render("add_usage", context! {})
    }

    pub(super) fn added(&self, task: &Task, mirror: &str) -> Result<String, minijinja::Error> {
        self.render(
            "add_ok",
            context! { task => self.task_view(task), mirror => mirror },
        )
    }

    pub(super) fn format_error(&self, error: &str) -> Result<String, minijinja::Error> {
        self.render("format_error", context! { error => error })
    }

    pub(super) fn list(&self, tasks: &[Task]) -> Result<String, minijinja::Error> {
        let views: Vec<_> = tasks.iter().map(|task| self.task_view(task)).collect();
        self.render("list", context! { tasks => views })
    }

    pub(super) fn today(&self, today: NaiveDate, tasks: &[Task]) -> Result<String, minijinja::Error> {
        let views: Vec<_> = tasks.iter().map(|task| self.task_view(task)).collect();
        self.render(
            "today",
            context! { today => today.format("%d.%m.%Y").to_string(), tasks => views },
        )
    }

    pub(super) fn delete_candidates(&self, tasks: &[Task]) -> Result<String, minijinja::Error> {
        let views: Vec<_> = tasks.iter().map(|task| self.task_view(task)).collect();
        self.render("delete_pick", context! { tasks => views })
    }

    pub(super) fn delete_bad_id(&self) -> Result<String, minijinja::Error> {
        self.render("delete_bad_id", context! {})
    }

    pub(super) fn deleted(&self, id: i64, mirror: &str) -> Result<String, minijinja::Error> {
        self.render("delete_ok", context! { id => id, mirror => mirror })
    }

    pub(super) fn delete_missing(&self) -> Result<String, minijinja::Error> {
        self.render("delete_missing", context! {})
    }

    pub(super) fn unknown(&self, name: &str) -> Result<String, minijinja::Error> {
        self.render("unknown", context! { name => name })
    }

    pub(super) fn not_a_command(&self) -> Result<String, minijinja::Error> {
        self.render("not_a_command", context! {})
    }
}
