use anyhow::Context;
use chrono::{Days, Local};
use dialoguer::{Input, MultiSelect, Password, Select};
use dotenvy::dotenv;
use tracing::{debug, warn};

use k12::batch::BatchWriter;
use k12::modules::attendance::AttendanceService;
use k12::modules::exams::ExamService;
use k12::modules::fees::FeeService;
use k12::modules::homework::HomeworkService;
use k12::modules::messages::MessageService;
use k12::modules::notices::NoticeService;
use k12::modules::session::{Feedback, Intent, NavState, Navigator};
use k12::modules::students::StudentService;
use k12::state::{AppAuth, AppState, AppStore, init_app_state};
use k12_core::AppError;
use k12_models::{
    AttendanceStatus, Homework, Notice, RegisterRequest, Student, StudentId, User, UserRole,
};
use k12_observability::{init_metrics, init_tracing, render_metrics};

type AppNavigator = Navigator<AppStore, AppAuth>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();
    let _metrics_handle = init_metrics();

    let AppState {
        store,
        session,
        batch,
    } = init_app_state().await.map_err(anyhow::Error::new)?;
    let mut navigator = Navigator::start(session).await;

    loop {
        show_feedback(&mut navigator);

        let keep_going = match navigator.state() {
            NavState::LoggedOut => logged_out_screen(&mut navigator).await?,
            NavState::DashboardParent => parent_dashboard(&mut navigator, &store).await?,
            NavState::DashboardTeacher => {
                teacher_dashboard(&mut navigator, &store, &batch).await?
            }
            state => {
                warn!(%state, "Navigator stopped in a transient state");
                false
            }
        };

        if !keep_going {
            break;
        }
    }

    if let Some(snapshot) = render_metrics() {
        debug!(metrics = %snapshot, "Session metrics");
    }
    println!("👋 Goodbye");
    Ok(())
}

fn show_feedback(navigator: &mut AppNavigator) {
    match navigator.take_feedback() {
        Some(Feedback::Success(message)) => println!("\n✅ {}", message),
        Some(Feedback::Error(message)) => eprintln!("\n❌ {}", message),
        None => {}
    }
}

fn show<T>(result: Result<T, AppError>, render: impl FnOnce(T)) {
    match result {
        Ok(value) => render(value),
        Err(e) => eprintln!("❌ {}", e.user_message()),
    }
}

fn text(prompt: &str) -> anyhow::Result<String> {
    Input::new()
        .with_prompt(prompt)
        .interact_text()
        .with_context(|| format!("Failed to read {}", prompt.to_lowercase()))
}

fn optional_text(prompt: &str) -> anyhow::Result<String> {
    Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .with_context(|| format!("Failed to read {}", prompt.to_lowercase()))
}

fn choose(prompt: &str, items: &[&str]) -> anyhow::Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .context("Failed to read selection")
}

/// Failed intents surface through the navigator feedback.
async fn dispatch(navigator: &mut AppNavigator, intent: Intent) {
    if let Err(e) = navigator.dispatch(intent).await {
        debug!(error = %e, "Intent failed");
    }
}

async fn logged_out_screen(navigator: &mut AppNavigator) -> anyhow::Result<bool> {
    match choose("K12", &["Log in", "Register", "Quit"])? {
        0 => {
            let email = text("Email")?;
            let password = Password::new()
                .with_prompt("Password")
                .interact()
                .context("Failed to read password")?;
            dispatch(navigator, Intent::Login { email, password }).await;
        }
        1 => {
            let request = registration_form()?;
            dispatch(navigator, Intent::Register(Box::new(request))).await;
        }
        _ => return Ok(false),
    }
    Ok(true)
}

fn registration_form() -> anyhow::Result<RegisterRequest> {
    let name = text("Full name")?;
    let email = text("Email")?;
    let phone_number = text("Phone number")?;
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords don't match")
        .interact()
        .context("Failed to read password")?;
    let role = match choose("I am a", &["Parent", "Teacher"])? {
        0 => UserRole::Parent,
        _ => UserRole::Teacher,
    };

    let (class_name, student_ids) = match role {
        UserRole::Teacher => (text("Class you teach")?, Vec::new()),
        UserRole::Parent => {
            let ids = optional_text("Student ids of your children (comma separated)")?;
            let ids = ids
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(StudentId::new)
                .collect();
            (String::new(), ids)
        }
    };

    Ok(RegisterRequest {
        name,
        email,
        phone_number,
        confirm_password: password.clone(),
        password,
        role,
        class_name,
        student_ids,
    })
}

fn current_profile(navigator: &AppNavigator) -> anyhow::Result<User> {
    navigator
        .profile()
        .cloned()
        .context("Dashboard shown without a profile")
}

async fn parent_dashboard(navigator: &mut AppNavigator, store: &AppStore) -> anyhow::Result<bool> {
    let profile = current_profile(navigator)?;
    println!("\n👪 {} ({})", profile.name, profile.email);

    let items = [
        "My children",
        "Attendance",
        "Homework and exams",
        "Notices",
        "Fees",
        "Inbox",
        "Log out",
    ];

    let choice = choose("Parent dashboard", &items)?;
    if choice == items.len() - 1 {
        dispatch(navigator, Intent::Logout).await;
        return Ok(true);
    }

    let children = match StudentService::get_students_by_parent(store, &profile.id).await {
        Ok(children) => children,
        Err(e) => {
            eprintln!("❌ {}", e.user_message());
            return Ok(true);
        }
    };

    match choice {
        0 => print_students(&children),
        1 => {
            for child in &children {
                println!("\n{}:", child.name);
                show(
                    AttendanceService::get_attendance_by_student(store, &child.id).await,
                    |records| {
                        for record in records {
                            println!("   {} {:?}", record.date, record.status);
                        }
                    },
                );
            }
        }
        2 => {
            for child in &children {
                println!("\n{} ({}):", child.name, child.class_name);
                show(
                    HomeworkService::get_homework_by_class(store, &child.class_name).await,
                    |homework| {
                        for item in homework {
                            println!("   📚 {} - {} (due {})", item.subject, item.title, item.due_date);
                        }
                    },
                );
                show(
                    ExamService::get_exams_by_class(store, &child.class_name).await,
                    |exams| {
                        for exam in exams {
                            println!("   📝 {} - {} on {}", exam.subject, exam.exam_name, exam.exam_date);
                        }
                    },
                );
            }
        }
        3 => {
            let class_name = children.first().map(|child| child.class_name.as_str());
            show(NoticeService::get_notices(store, class_name).await, print_notices);
        }
        4 => {
            for child in &children {
                println!("\n{}:", child.name);
                show(FeeService::get_fees_by_student(store, &child.id).await, |fees| {
                    for fee in fees {
                        println!(
                            "   {} {:.2} due {} [{:?}]",
                            fee.fee_type, fee.amount, fee.due_date, fee.status
                        );
                    }
                });
            }
        }
        _ => show_inbox(store, &profile).await,
    }

    Ok(true)
}

async fn teacher_dashboard(
    navigator: &mut AppNavigator,
    store: &AppStore,
    batch: &BatchWriter,
) -> anyhow::Result<bool> {
    let profile = current_profile(navigator)?;
    println!("\n🍎 {} ({})", profile.name, profile.class_name);

    let items = [
        "Class students",
        "Mark attendance",
        "Add homework",
        "Post notice",
        "Inbox",
        "Log out",
    ];

    match choose("Teacher dashboard", &items)? {
        0 => show(
            StudentService::get_students_by_class(store, &profile.class_name).await,
            |students| print_students(&students),
        ),
        1 => mark_attendance(store, batch, &profile).await?,
        2 => {
            let title = text("Title")?;
            let subject = text("Subject")?;
            let description = optional_text("Description")?;
            let due_in: u64 = Input::new()
                .with_prompt("Due in days")
                .default(7)
                .interact_text()
                .context("Failed to read due date")?;

            let today = Local::now().date_naive();
            let due_date = today.checked_add_days(Days::new(due_in)).unwrap_or(today);
            let homework = Homework::new(
                title,
                subject,
                profile.class_name.clone(),
                profile.id.clone(),
                today,
                due_date,
            )
            .with_description(description);

            show(HomeworkService::add_homework(store, homework).await, |id| {
                println!("✅ Homework added ({})", id)
            });
        }
        3 => {
            let title = text("Title")?;
            let description = text("Description")?;
            let today = Local::now().date_naive();
            let notice = match choose("Audience", &["All classes", "My class"])? {
                0 => Notice::for_all(title, description, profile.id.clone(), today),
                _ => Notice::for_class(
                    title,
                    description,
                    profile.class_name.clone(),
                    profile.id.clone(),
                    today,
                ),
            };

            show(NoticeService::add_notice(store, notice).await, |id| {
                println!("✅ Notice posted ({})", id)
            });
        }
        4 => show_inbox(store, &profile).await,
        _ => dispatch(navigator, Intent::Logout).await,
    }

    Ok(true)
}

async fn mark_attendance(store: &AppStore, batch: &BatchWriter, teacher: &User) -> anyhow::Result<()> {
    let students = match StudentService::get_students_by_class(store, &teacher.class_name).await {
        Ok(students) if students.is_empty() => {
            println!("No students in {}", teacher.class_name);
            return Ok(());
        }
        Ok(students) => students,
        Err(e) => {
            eprintln!("❌ {}", e.user_message());
            return Ok(());
        }
    };

    let labels: Vec<String> = students
        .iter()
        .map(|s| format!("{:>3}. {}", s.roll_number, s.name))
        .collect();
    let absent = MultiSelect::new()
        .with_prompt("Select absent students")
        .items(&labels)
        .interact()
        .context("Failed to read attendance")?;
    let absent: Vec<&StudentId> = absent.into_iter().map(|i| &students[i].id).collect();

    let records = AttendanceService::register_for(
        &students,
        Local::now().date_naive(),
        &teacher.id,
        |student| {
            if absent.contains(&&student.id) {
                AttendanceStatus::Absent
            } else {
                AttendanceStatus::Present
            }
        },
    );

    let report = AttendanceService::submit_attendance(store, batch, records).await;
    println!("\n{}", report.summary("attendance records"));
    for failure in &report.failures {
        eprintln!("   ❌ {}: {}", students[failure.index].name, failure.message);
    }

    Ok(())
}

fn print_students(students: &[Student]) {
    if students.is_empty() {
        println!("No students found");
    }
    for student in students {
        println!(
            "   {:>3}. {} ({}) [{}]",
            student.roll_number, student.name, student.class_name, student.id
        );
    }
}

fn print_notices(notices: Vec<Notice>) {
    if notices.is_empty() {
        println!("No notices");
    }
    for notice in notices {
        println!("   📢 [{}] {}: {}", notice.target_audience, notice.title, notice.description);
    }
}

async fn show_inbox(store: &AppStore, profile: &User) {
    show(MessageService::get_messages(store, &profile.id).await, |messages| {
        if messages.is_empty() {
            println!("Inbox is empty");
        }
        for message in messages {
            println!("   ✉️  {}: {}", message.sender_name, message.content);
        }
    });
}
