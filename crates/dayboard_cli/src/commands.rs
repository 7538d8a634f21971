//! Subcommand handlers.
//!
//! Each handler builds the service it needs over the shared store, runs one
//! operation and prints a plain-text result to stdout.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use dayboard_core::{
    export_bundle, import_bundle, Goal, GoalDraft, GoalService, Habit, HabitDraft, HabitService,
    NewReflection, PlanGoal, ReflectionEntry, ReflectionService, Reminder, SettingsService,
    Skill, SkillDraft, SkillService, SqliteKeyValueStore, SummaryService, Task, TaskQuery,
    TaskService, WeeklyPlan, WeeklyReview, WeeklyService,
};
use log::info;

use crate::cli::{
    Commands, GoalArgs, GoalCommand, HabitArgs, HabitCommand, NotifyCommand, ReflectCommand,
    RemindCommand, SkillArgs, SkillCommand, TaskCommand, WeekCommand,
};

type Store<'a> = &'a SqliteKeyValueStore<'a>;

pub fn dispatch(command: Commands, store: Store<'_>, today: NaiveDate) -> Result<()> {
    match command {
        Commands::Goal(cmd) => goal(cmd, store),
        Commands::Habit(cmd) => habit(cmd, store, today),
        Commands::Task(cmd) => task(cmd, store, today),
        Commands::Reflect(cmd) => reflect(cmd, store, today),
        Commands::Skill(cmd) => skill(cmd, store),
        Commands::Notify(cmd) => notify(cmd, store),
        Commands::Remind(cmd) => remind(cmd, store),
        Commands::Week(cmd) => week(cmd, store, today),
        Commands::Summary => summary(store, today),
        Commands::Export { output } => export(store, &output),
        Commands::Import { path } => import(store, &path),
    }
}

fn goal_draft(args: GoalArgs) -> GoalDraft {
    GoalDraft {
        title: args.title,
        description: args.description,
        category: args.category,
        target: args.target,
        current: args.current,
        deadline: args.deadline,
    }
}

fn print_goal(goal: &Goal) {
    println!(
        "{}  {}  {}/{} ({:.0}%)  due {}  milestones {}/{}",
        goal.id,
        goal.title,
        goal.current,
        goal.target,
        goal.progress_percent(),
        goal.deadline,
        goal.completed_milestones(),
        goal.milestones.len()
    );
}

fn goal(cmd: GoalCommand, store: Store<'_>) -> Result<()> {
    let service = GoalService::new(store);
    match cmd {
        GoalCommand::List => {
            for goal in service.list_goals()? {
                print_goal(&goal);
                for milestone in &goal.milestones {
                    let mark = if milestone.completed { 'x' } else { ' ' };
                    println!("    [{mark}] {}  {}", milestone.id, milestone.description);
                }
            }
        }
        GoalCommand::Add(args) => print_goal(&service.add_goal(goal_draft(args))?),
        GoalCommand::Edit { id, fields } => print_goal(&service.edit_goal(&id, goal_draft(fields))?),
        GoalCommand::Progress { id, value } => print_goal(&service.update_progress(&id, value)?),
        GoalCommand::Delete { id } => {
            service.delete_goal(&id)?;
            println!("deleted goal {id}");
        }
        GoalCommand::Milestone {
            goal_id,
            description,
        } => {
            let milestone = service.add_milestone(&goal_id, &description)?;
            println!("{}  {}", milestone.id, milestone.description);
        }
        GoalCommand::ToggleMilestone {
            goal_id,
            milestone_id,
        } => {
            let completed = service.toggle_milestone(&goal_id, &milestone_id)?;
            println!("milestone {milestone_id} completed={completed}");
        }
    }
    Ok(())
}

fn habit_draft(args: HabitArgs) -> HabitDraft {
    HabitDraft {
        name: args.name,
        description: args.description,
        category: args.category,
        frequency: args.frequency,
        tracking_period: args.period,
    }
}

fn print_habit(habit: &Habit) {
    println!(
        "{}  {}  {}x {}  streak {}",
        habit.id,
        habit.name,
        habit.frequency,
        habit.tracking_period.as_str(),
        habit.streak
    );
}

fn habit(cmd: HabitCommand, store: Store<'_>, today: NaiveDate) -> Result<()> {
    let service = HabitService::new(store);
    match cmd {
        HabitCommand::List => {
            for habit in service.list_habits()? {
                print_habit(&habit);
            }
        }
        HabitCommand::Add(args) => print_habit(&service.add_habit(habit_draft(args))?),
        HabitCommand::Edit { id, fields } => {
            print_habit(&service.edit_habit(&id, habit_draft(fields), today)?)
        }
        HabitCommand::Delete { id } => {
            service.delete_habit(&id)?;
            println!("deleted habit {id}");
        }
        HabitCommand::Toggle { id, date } => {
            let date = date.unwrap_or(today);
            let habit = service.toggle_completion(&id, date, today)?;
            let state = if habit.is_completed_on(date) {
                "done"
            } else {
                "cleared"
            };
            println!("{date} {state}; streak {}", habit.streak);
        }
        HabitCommand::Days { id } => {
            for day in service.tracking_days(&id, today)? {
                let mark = if day.completed { 'x' } else { ' ' };
                println!("[{mark}] {}", day.date);
            }
        }
        HabitCommand::Refresh => {
            let changed = service.refresh_streaks(today)?;
            println!("refreshed {changed} streak(s)");
        }
    }
    Ok(())
}

fn print_task(position: usize, task: &Task) {
    let mark = if task.completed { 'x' } else { ' ' };
    let tags = if task.tags.is_empty() {
        String::new()
    } else {
        format!("  #{}", task.tags.join(" #"))
    };
    println!(
        "{position:>3} [{mark}] {}  {}  {:?}  due {}  {}  {}m est, {}m spent{tags}",
        task.id,
        task.title,
        task.priority,
        task.due_date,
        task.category,
        task.estimated_time,
        task.time_spent / 60
    );
}

fn task(cmd: TaskCommand, store: Store<'_>, today: NaiveDate) -> Result<()> {
    let service = TaskService::new(store);
    match cmd {
        TaskCommand::List {
            hide_completed,
            search,
            filter,
            sort,
        } => {
            let query = TaskQuery {
                show_completed: !hide_completed,
                search,
                filter,
                sort,
            };
            // Positions refer to stored order so they can feed `task reorder`.
            let stored = service.list_tasks()?;
            for task in query.apply(&stored) {
                let position = stored
                    .iter()
                    .position(|candidate| candidate.id == task.id)
                    .unwrap_or_default();
                print_task(position, task);
            }
        }
        TaskCommand::Add {
            title,
            description,
            due,
            priority,
            quadrant,
            estimate,
            tags,
        } => {
            let mut task = Task::new(title, due.unwrap_or(today));
            task.description = description;
            task.priority = priority;
            task.category = quadrant;
            task.estimated_time = estimate;
            task.set_tags(tags);
            let total = service.list_tasks()?.len();
            print_task(total, &service.add_task(task)?);
        }
        TaskCommand::Done { id } => {
            service.set_completed(&id, true)?;
            println!("completed task {id}");
        }
        TaskCommand::Undo { id } => {
            service.set_completed(&id, false)?;
            println!("reopened task {id}");
        }
        TaskCommand::Delete { id } => {
            service.delete_task(&id)?;
            println!("deleted task {id}");
        }
        TaskCommand::Move { id, quadrant } => {
            service.move_to_quadrant(&id, quadrant)?;
            println!("moved task {id} to {quadrant}");
        }
        TaskCommand::Reorder { from, to } => {
            service.reorder_task(from, to)?;
            println!("moved position {from} to {to}");
        }
        TaskCommand::Focus { id } => {
            let task = service.log_focus_session(&id)?;
            println!("{}: {}m focused", task.title, task.time_spent / 60);
        }
        TaskCommand::Matrix => {
            for (quadrant, tasks) in service.matrix()? {
                println!("{quadrant} ({})", tasks.len());
                for task in tasks {
                    let mark = if task.completed { 'x' } else { ' ' };
                    println!("    [{mark}] {}  {}", task.id, task.title);
                }
            }
        }
        TaskCommand::Tags => {
            for tag in service.tags()? {
                println!("{tag}");
            }
        }
    }
    Ok(())
}

fn print_reflection(entry: &ReflectionEntry) {
    println!("{}  {}  {}", entry.id, entry.date, entry.content);
    if !entry.lessons.is_empty() {
        println!("    lessons: {}", entry.lessons);
    }
    if !entry.tags.is_empty() {
        println!("    tags: {}", entry.tags.join(", "));
    }
}

fn reflect(cmd: ReflectCommand, store: Store<'_>, today: NaiveDate) -> Result<()> {
    let service = ReflectionService::new(store);
    match cmd {
        ReflectCommand::List { search } => {
            let entries = match search {
                Some(needle) => service.search_reflections(&needle)?,
                None => service.list_reflections()?,
            };
            for entry in &entries {
                print_reflection(entry);
            }
        }
        ReflectCommand::Add {
            content,
            lessons,
            tags,
            date,
        } => {
            let entry = service.add_reflection(NewReflection {
                date: date.unwrap_or(today),
                content,
                lessons,
                tags,
            })?;
            print_reflection(&entry);
        }
        ReflectCommand::Delete { id } => {
            service.delete_reflection(&id)?;
            println!("deleted reflection {id}");
        }
    }
    Ok(())
}

fn skill_draft(args: SkillArgs) -> SkillDraft {
    SkillDraft {
        name: args.name,
        category: args.category,
        current_level: args.current_level,
        target_level: args.target_level,
    }
}

fn print_skill(skill: &Skill) {
    println!(
        "{}  {}  level {}/{}  {:.0}%",
        skill.id, skill.name, skill.current_level, skill.target_level, skill.progress
    );
}

fn skill(cmd: SkillCommand, store: Store<'_>) -> Result<()> {
    let service = SkillService::new(store);
    match cmd {
        SkillCommand::List => {
            for skill in service.list_skills()? {
                print_skill(&skill);
            }
        }
        SkillCommand::Add(args) => print_skill(&service.add_skill(skill_draft(args))?),
        SkillCommand::Edit { id, fields } => {
            print_skill(&service.edit_skill(&id, skill_draft(fields))?)
        }
        SkillCommand::Progress { id, value } => print_skill(&service.update_progress(&id, value)?),
        SkillCommand::Delete { id } => {
            service.delete_skill(&id)?;
            println!("deleted skill {id}");
        }
    }
    Ok(())
}

fn notify(cmd: NotifyCommand, store: Store<'_>) -> Result<()> {
    let service = SettingsService::new(store);
    match cmd {
        NotifyCommand::List => {
            for setting in service.notification_settings()? {
                let state = if setting.enabled { "on" } else { "off" };
                println!("{:<3} {}", state, setting.kind);
            }
        }
        NotifyCommand::Toggle { kind } => {
            let enabled = service.toggle_notification(&kind)?;
            println!("{kind} enabled={enabled}");
        }
    }
    Ok(())
}

fn print_reminder(reminder: &Reminder) {
    let state = if reminder.enabled { "on" } else { "off" };
    println!(
        "{}  {:?}  {}  {}  {}",
        reminder.id,
        reminder.kind,
        reminder.time,
        reminder.days.join(","),
        state
    );
}

fn remind(cmd: RemindCommand, store: Store<'_>) -> Result<()> {
    let service = SettingsService::new(store);
    match cmd {
        RemindCommand::List => {
            for reminder in service.list_reminders()? {
                print_reminder(&reminder);
            }
        }
        RemindCommand::Add { kind, time, days } => {
            let days = if days.is_empty() {
                Reminder::workdays()
            } else {
                days
            };
            print_reminder(&service.add_reminder(kind, &time, &days)?);
        }
        RemindCommand::Toggle { id } => {
            let enabled = service.toggle_reminder(&id)?;
            println!("reminder {id} enabled={enabled}");
        }
        RemindCommand::Delete { id } => {
            service.delete_reminder(&id)?;
            println!("deleted reminder {id}");
        }
    }
    Ok(())
}

fn print_week(review: &WeeklyReview, plan: &WeeklyPlan) {
    println!("week starting {}", review.week_starting);
    println!("  accomplishments: {}", review.accomplishments);
    println!("  challenges: {}", review.challenges);
    println!("  lessons learned: {}", review.lessons_learned);
    println!("  gratitude: {}", review.gratitude);
    println!("  top goals:");
    for goal in plan.top_goals.iter().filter(|goal| !goal.text.is_empty()) {
        println!("    {} ({:.0}%)", goal.text, goal.progress);
    }
    println!("  key tasks:");
    for task in plan.key_tasks.iter().filter(|task| !task.is_empty()) {
        println!("    {task}");
    }
    println!("  focus areas: {}", plan.focus_areas.join(", "));
    println!("  personal development: {}", plan.personal_development);
}

/// Overwrites leading slots with `values`, growing the list when needed.
fn fill_slots(slots: &mut Vec<String>, values: Vec<String>) {
    for (index, value) in values.into_iter().enumerate() {
        match slots.get_mut(index) {
            Some(slot) => *slot = value,
            None => slots.push(value),
        }
    }
}

fn week(cmd: WeekCommand, store: Store<'_>, today: NaiveDate) -> Result<()> {
    let service = WeeklyService::new(store);
    match cmd {
        WeekCommand::Show { date } => {
            let date = date.unwrap_or(today);
            print_week(&service.review_for(date)?, &service.plan_for(date)?);
        }
        WeekCommand::Review {
            date,
            accomplishments,
            challenges,
            lessons,
            gratitude,
        } => {
            let date = date.unwrap_or(today);
            let mut review = service.review_for(date)?;
            let plan = service.plan_for(date)?;
            if let Some(value) = accomplishments {
                review.accomplishments = value;
            }
            if let Some(value) = challenges {
                review.challenges = value;
            }
            if let Some(value) = lessons {
                review.lessons_learned = value;
            }
            if let Some(value) = gratitude {
                review.gratitude = value;
            }
            service.save_review(date, &review)?;
            print_week(&review, &plan);
        }
        WeekCommand::Plan {
            date,
            goals,
            goal_progress,
            tasks,
            focus,
            development,
        } => {
            if goal_progress.len() > goals.len() {
                bail!(
                    "--goal-progress given {} times for {} goals",
                    goal_progress.len(),
                    goals.len()
                );
            }
            let date = date.unwrap_or(today);
            let review = service.review_for(date)?;
            let mut plan = service.plan_for(date)?;
            for (index, text) in goals.into_iter().enumerate() {
                let goal = PlanGoal {
                    text,
                    progress: goal_progress.get(index).copied().unwrap_or(0.0),
                };
                match plan.top_goals.get_mut(index) {
                    Some(slot) => *slot = goal,
                    None => plan.top_goals.push(goal),
                }
            }
            fill_slots(&mut plan.key_tasks, tasks);
            fill_slots(&mut plan.focus_areas, focus);
            if let Some(value) = development {
                plan.personal_development = value;
            }
            service.save_plan(date, &plan)?;
            print_week(&review, &plan);
        }
    }
    Ok(())
}

fn summary(store: Store<'_>, today: NaiveDate) -> Result<()> {
    let summary = SummaryService::new(store).summary(today)?;
    println!(
        "goals        {} (avg {:.0}%)",
        summary.goals_total, summary.goals_average_percent
    );
    println!(
        "habits       {} (best streak {})",
        summary.habits_total, summary.best_streak
    );
    println!(
        "tasks        {} done / {} total ({:.0}%), {} overdue",
        summary.tasks_done,
        summary.tasks_total,
        summary.task_completion_percent(),
        summary.tasks_overdue
    );
    println!("reflections  {}", summary.reflections_total);
    Ok(())
}

fn export(store: Store<'_>, output: &Path) -> Result<()> {
    let text = export_bundle(store)?;
    if output == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        writeln!(stdout)?;
        return Ok(());
    }
    fs::write(output, &text)
        .with_context(|| format!("failed to write export to {}", output.display()))?;
    info!("event=cli_export module=cli status=ok bytes={}", text.len());
    println!("exported to {}", output.display());
    Ok(())
}

fn import(store: Store<'_>, path: &Path) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let report = import_bundle(store, &text)
        .with_context(|| format!("import of {} failed; nothing was written", path.display()))?;
    println!(
        "imported {} key(s), reset {} missing collection(s)",
        report.imported.len(),
        report.defaulted.len()
    );
    if !report.ignored.is_empty() {
        println!("ignored unknown keys: {}", report.ignored.join(", "));
    }
    Ok(())
}
