fn main() -> anyhow::Result<()> {
    stoppage_watch_lib::run()
}
