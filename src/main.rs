fn main() {
    sidescroll_shooter::game::run();
}
