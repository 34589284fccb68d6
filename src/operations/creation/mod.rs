mod make_shell;

pub use make_shell::MakeShell;
