use macroquad::prelude::*;
use organism_life::{
    Camera, Simulation, SimulationConfig,
    rendering::{self, Finished, PALETTE, SceneVisual},
    ui, input,
};

fn window_conf() -> Conf {
    Conf {
        window_title: "Organism Life".to_owned(),
        window_width: 1000,
        window_height: 800,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let config = SimulationConfig::default().with_size(40).with_density(0.3);
    let mut sim = match Simulation::new(config, SceneVisual::new(PALETTE.len())) {
        Ok(sim) => sim,
        Err(err) => {
            log::error!("cannot start simulation: {err}");
            return;
        }
    };
    sim.on_transition_complete(|summary| {
        log::trace!("generation settled: {summary:?}");
    });

    let mut camera = Camera::new();
    camera.fit(sim.current_grid().size(), ui::grid_area_width(), ui::grid_area_height(), ui::CELL_SIZE);

    loop {
        let mouse_pos = mouse_position();
        let dt = get_frame_time();

        // Recreate buttons with current panel position
        let buttons = ui::create_buttons(sim.is_idle());
        input::process_button_clicks(&mut sim, &buttons, mouse_pos);
        input::handle_zoom(&mut camera);
        input::handle_pan(&mut camera, mouse_pos);
        input::process_keyboard_input(&mut sim, &mut camera, mouse_pos);

        // Animations first, so completions land before the scheduler looks at readiness
        for finished in sim.visual_mut().update(dt) {
            match finished {
                Finished::Removal(handle) => sim.removal_complete(handle),
                Finished::Growth(handle) => sim.growth_complete(handle),
            }
        }
        sim.tick(dt);

        clear_background(BLACK);
        rendering::draw_scene(sim.visual(), sim.current_grid().size(), &camera);
        rendering::draw_controls(&sim, &camera, &buttons, mouse_pos);

        next_frame().await;
    }
}
