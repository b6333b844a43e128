mod game_steps;
mod session_steps;
