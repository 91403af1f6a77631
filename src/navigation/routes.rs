/// Layout that wraps a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    /// Login, registration and company onboarding pages.
    Public,
    /// Sidebar layout of company members.
    Main,
    /// Console of platform administrators.
    Admin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Root,
    Login,
    Register,
    CompanySetup,
    PendingApproval,
    AdminLogin,
    Dashboard,
    Declarations,
    Certificates,
    Tasks,
    Documents,
    Clients,
    Partners,
    Employees,
    Requests,
    Settings,
    AdminDashboard,
    AdminCompanies,
    AdminUsers,
    AdminRequests,
    NotFound,
}

impl AppRoute {
    pub const ALL: [AppRoute; 20] = [
        AppRoute::Root,
        AppRoute::Login,
        AppRoute::Register,
        AppRoute::CompanySetup,
        AppRoute::PendingApproval,
        AppRoute::AdminLogin,
        AppRoute::Dashboard,
        AppRoute::Declarations,
        AppRoute::Certificates,
        AppRoute::Tasks,
        AppRoute::Documents,
        AppRoute::Clients,
        AppRoute::Partners,
        AppRoute::Employees,
        AppRoute::Requests,
        AppRoute::Settings,
        AppRoute::AdminDashboard,
        AppRoute::AdminCompanies,
        AppRoute::AdminUsers,
        AppRoute::AdminRequests,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            AppRoute::Root => "/",
            AppRoute::Login => "/login",
            AppRoute::Register => "/register",
            AppRoute::CompanySetup => "/company-setup",
            AppRoute::PendingApproval => "/pending-approval",
            AppRoute::AdminLogin => "/admin/login",
            AppRoute::Dashboard => "/dashboard",
            AppRoute::Declarations => "/declarations",
            AppRoute::Certificates => "/certificates",
            AppRoute::Tasks => "/tasks",
            AppRoute::Documents => "/documents",
            AppRoute::Clients => "/clients",
            AppRoute::Partners => "/partners",
            AppRoute::Employees => "/employees",
            AppRoute::Requests => "/requests",
            AppRoute::Settings => "/settings",
            AppRoute::AdminDashboard => "/admin/dashboard",
            AppRoute::AdminCompanies => "/admin/companies",
            AppRoute::AdminUsers => "/admin/users",
            AppRoute::AdminRequests => "/admin/requests",
            AppRoute::NotFound => "/404",
        }
    }

    pub fn shell(&self) -> Shell {
        match self {
            AppRoute::Root
            | AppRoute::Login
            | AppRoute::Register
            | AppRoute::CompanySetup
            | AppRoute::PendingApproval
            | AppRoute::AdminLogin
            | AppRoute::NotFound => Shell::Public,
            AppRoute::AdminDashboard
            | AppRoute::AdminCompanies
            | AppRoute::AdminUsers
            | AppRoute::AdminRequests => Shell::Admin,
            _ => Shell::Main,
        }
    }

    /// Matches a request path, ignoring the query string and a trailing slash.
    pub fn from_path(path: &str) -> AppRoute {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Self::ALL
            .into_iter()
            .find(|route| route.path() == path)
            .unwrap_or(AppRoute::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip_through_the_table() {
        for route in AppRoute::ALL {
            assert_eq!(AppRoute::from_path(route.path()), route);
        }
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/admin"), AppRoute::NotFound);
    }

    #[test]
    fn trailing_slash_and_query_are_ignored() {
        assert_eq!(AppRoute::from_path("/tasks/"), AppRoute::Tasks);
        assert_eq!(
            AppRoute::from_path("/declarations?page=2"),
            AppRoute::Declarations
        );
    }

    #[test]
    fn shells_follow_the_url_space() {
        assert_eq!(AppRoute::AdminUsers.shell(), Shell::Admin);
        assert_eq!(AppRoute::AdminLogin.shell(), Shell::Public);
        assert_eq!(AppRoute::Employees.shell(), Shell::Main);
    }
}
