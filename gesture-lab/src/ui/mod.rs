mod menubar;
mod popout_page;
mod slide_page;
