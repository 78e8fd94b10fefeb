//! The app's url patterns

use crate::error::PatternError;
use crate::table::RouteTable;
use crate::views::{CaUserSignupView, GameView, JoinView, LoginView, ProfileView};

/// Build the route table for the site.
///
/// `index` and `game` are each declared twice. Resolution always lands on
/// the earlier declaration, so `/game/<host_name>` is never the match for a
/// request; it only matters to `reverse`.
pub fn url_patterns() -> Result<RouteTable, PatternError> {
    RouteTable::builder()
        .route("/login/", LoginView, "index")
        .route("/game/<host_game>", GameView, "game")
        .route("/", LoginView, "index")
        .route("/game/<host_name>", GameView, "game")
        .login_required("/profile/<profile_user>", ProfileView, "profile")
        .login_required("/join/<user_name>", JoinView, "join")
        .route("/register/", CaUserSignupView, "confirm")
        .build()
}
