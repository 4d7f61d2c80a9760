pub mod saturday_watch;
