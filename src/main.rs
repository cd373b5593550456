fn main() -> std::process::ExitCode {
    modpack_installer_lib::run()
}
