//! Root application component with routing and the session context.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::navbar::Navbar;
use crate::pages::{
    consultations::ConsultationsPage, home::HomePage, inspection_create::InspectionCreatePage,
    inspection_details::InspectionDetailsPage, login::LoginPage, patient_card::PatientCardPage,
    patients::PatientsPage, profile::ProfilePage, register::RegisterPage, reports::ReportsPage,
};
use crate::state::session::Session;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="ru">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session context and sets up client-side routing. The session
/// starts pending on both server and browser; the stored token is read once
/// the app is running in the browser.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(Session::pending());
    provide_context(session);

    Effect::new(move || {
        session.set(Session::from_token(crate::util::storage::load_token()));
        crate::util::auth::init_session(session);
    });

    view! {
        <Title text="МИС"/>

        <Router>
            <Navbar/>
            <main class="app-main">
                <Routes fallback=|| "Страница не найдена.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("profile") view=ProfilePage/>
                    <Route path=StaticSegment("patients") view=PatientsPage/>
                    <Route path=(StaticSegment("patient"), ParamSegment("id")) view=PatientCardPage/>
                    <Route
                        path=(StaticSegment("inspection"), StaticSegment("create"))
                        view=InspectionCreatePage
                    />
                    <Route path=(StaticSegment("inspection"), ParamSegment("id")) view=InspectionDetailsPage/>
                    <Route path=StaticSegment("reports") view=ReportsPage/>
                    <Route path=StaticSegment("consultations") view=ConsultationsPage/>
                </Routes>
            </main>
        </Router>
    }
}
