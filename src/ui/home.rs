use leptos::prelude::*;
use leptos_router::components::A;

use super::{layout::Page, use_locale};
use crate::{i18n::Text, routes::AppRoute};

#[component]
pub fn HomePage() -> impl IntoView {
    let locale = use_locale();

    view! {
        <Page>
            <section class="hero">
                <h1>"DeafAbility"</h1>
                <p>
                    "แพลตฟอร์มเรียนรู้และหางานสำหรับผู้พิการทางการได้ยิน"
                </p>
                <div class="hero-actions">
                    <A href=AppRoute::Courses.path()>
                        <span class="button">{Text::CoursesTitle.get(locale)}</span>
                    </A>
                    <A href=AppRoute::Jobs.path()>
                        <span class="button secondary">{Text::JobsTitle.get(locale)}</span>
                    </A>
                </div>
            </section>
        </Page>
    }
}
