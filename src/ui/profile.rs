use leptos::prelude::*;
use leptos_router::components::A;

use super::{layout::Page, use_locale};
use crate::{i18n::Text, models::UserProfile, routes::AppRoute};

#[component]
pub fn ProfilePage() -> impl IntoView {
    let locale = use_locale();
    let profile = UserProfile::demo();
    let course = profile.completed_course.clone();
    let percent = profile.completed_percent.clamp(0.0, 100.0);

    view! {
        <Page>
            <section class="profile">
                <h1>{profile.name.clone()}</h1>
                <dl>
                    <dt>{Text::Age.get(locale)}</dt>
                    <dd>{profile.age}</dd>
                    <dt>{Text::Education.get(locale)}</dt>
                    <dd>{profile.education.clone()}</dd>
                    <dt>{Text::InterestedJob.get(locale)}</dt>
                    <dd>{profile.interested_job.clone()}</dd>
                    <dt>{Text::Contact.get(locale)}</dt>
                    <dd>{profile.email.clone()}</dd>
                </dl>

                <h2>{Text::CompletedCourses.get(locale)}</h2>
                <A href=AppRoute::Course(course.id).path()>
                    <article class="card">
                        <h3>{course.name.clone()}</h3>
                        <p class="meta">{format!("{} · {}", course.level, course.category)}</p>
                        <div class="progress-bar">
                            <div class="progress-fill" style=format!("width: {percent}%")></div>
                        </div>
                        <p class="meta">{format!("{percent:.0}%")}</p>
                    </article>
                </A>
            </section>
        </Page>
    }
}
